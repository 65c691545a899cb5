//! Check command: fail when a reload is pending.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::error::CommandError;
use crate::logging::Logger;
use crate::placement::Resolution;

/// Resolutions that need a reload, in input order.
#[must_use]
pub fn pending_reloads<'r, 'a>(resolutions: &'r [Resolution<'a>]) -> Vec<&'r Resolution<'a>> {
    resolutions
        .iter()
        .filter(|r| r.decision.reload_required)
        .collect()
}

/// Run the check command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or any extension needs
/// a reload.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let resolutions = setup.resolve();
    let pending = pending_reloads(&resolutions);

    log.stage("Checking for pending reloads");
    if pending.is_empty() {
        log.info(&format!(
            "{} extension(s) up to date, no reload needed",
            resolutions.len()
        ));
        return Ok(());
    }

    super::record_all(&pending, log);
    log.print_summary();
    Err(CommandError::ReloadRequired {
        count: pending.len(),
    }
    .into())
}
