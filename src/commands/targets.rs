//! Targets command: where else an extension can be installed.
use anyhow::Result;

use crate::cli::{GlobalOpts, TargetsOpts};
use crate::config::Snapshot;
use crate::error::CommandError;
use crate::logging::Logger;
use crate::model::{ExtensionRef, Server};
use crate::placement::install_targets;

/// Install targets for every record of `id`.
///
/// # Errors
///
/// Returns [`CommandError::UnknownExtension`] if no record matches `id`.
pub fn targets_for<'a>(
    snapshot: &'a Snapshot,
    id: &'a str,
    anywhere: bool,
) -> Result<Vec<(&'a ExtensionRef, Vec<Server>)>, CommandError> {
    let found: Vec<_> = snapshot
        .find(id)
        .map(|ext| {
            let targets = install_targets(ext, &snapshot.installed, &snapshot.servers, anywhere);
            (ext, targets)
        })
        .collect();
    if found.is_empty() {
        return Err(CommandError::UnknownExtension(id.to_string()));
    }
    Ok(found)
}

/// Run the targets command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or `--id` matches nothing.
pub fn run(global: &GlobalOpts, opts: &TargetsOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let snapshot = &setup.snapshot;

    log.stage(&format!("Install targets for {}", opts.id));
    for (ext, targets) in targets_for(snapshot, &opts.id, opts.anywhere)? {
        let name = super::record_name(ext);
        if targets.is_empty() {
            log.info(&format!("{name}: no other server"));
        } else {
            let labels: Vec<String> = targets.iter().map(|s| snapshot.servers.label(*s)).collect();
            log.info(&format!("{name}: {}", labels.join(", ")));
        }
    }
    Ok(())
}
