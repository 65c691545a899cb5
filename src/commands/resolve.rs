//! Resolve command implementation.
use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalOpts, ResolveOpts};
use crate::error::CommandError;
use crate::logging::Logger;
use crate::model::Server;
use crate::placement::{PlacementDecision, Resolution};

/// One line of `resolve --json` output.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    id: &'a str,
    version: &'a str,
    server: Option<Server>,
    #[serde(flatten)]
    decision: &'a PlacementDecision,
    message: String,
}

/// Keep only records matching `id`, or everything when `id` is `None`.
///
/// # Errors
///
/// Returns [`CommandError::UnknownExtension`] if `id` matches nothing.
pub fn select<'r, 'a>(
    resolutions: &'r [Resolution<'a>],
    id: Option<&str>,
) -> Result<Vec<&'r Resolution<'a>>, CommandError> {
    let Some(id) = id else {
        return Ok(resolutions.iter().collect());
    };
    let selected: Vec<_> = resolutions
        .iter()
        .filter(|r| r.extension.identifier.id.eq_ignore_ascii_case(id))
        .collect();
    if selected.is_empty() {
        return Err(CommandError::UnknownExtension(id.to_string()));
    }
    Ok(selected)
}

/// Render resolutions as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(resolutions: &[&Resolution<'_>]) -> Result<String, CommandError> {
    let entries: Vec<Entry<'_>> = resolutions
        .iter()
        .map(|r| Entry {
            id: &r.extension.identifier.id,
            version: &r.extension.version,
            server: r.extension.server,
            decision: &r.decision,
            message: r.decision.message(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Run the resolve command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or `--id` matches nothing.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &ResolveOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let resolutions = setup.resolve();
    let selected = select(&resolutions, opts.id.as_deref())?;

    if opts.json {
        println!("{}", render_json(&selected)?);
        return Ok(());
    }

    log.stage("Resolving placement");
    super::record_all(&selected, log);
    log.print_summary();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Snapshot;
    use crate::host::HostPolicy;
    use crate::placement::resolve_all;

    const SNAPSHOT: &str = r#"
[[installed]]
id = "pub.stable"
version = "1.0.0"
server = "local"
[installed.manifest]
extension_kind = ["ui"]

[[installed]]
id = "pub.updated"
version = "2.0.0"
server = "local"
[installed.manifest]
extension_kind = ["ui"]

[[running]]
id = "pub.stable"
version = "1.0.0"
server = "local"

[[running]]
id = "pub.updated"
version = "1.0.0"
server = "local"
"#;

    #[test]
    fn select_filters_case_insensitively() {
        let snapshot: Snapshot = toml::from_str(SNAPSHOT).unwrap();
        let all = resolve_all(&snapshot.inputs(), &HostPolicy::default(), false);
        assert_eq!(select(&all, None).unwrap().len(), 2);
        let one = select(&all, Some("PUB.UPDATED")).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].decision.reload_required);
    }

    #[test]
    fn select_unknown_id_errors() {
        let snapshot: Snapshot = toml::from_str(SNAPSHOT).unwrap();
        let all = resolve_all(&snapshot.inputs(), &HostPolicy::default(), false);
        let err = select(&all, Some("pub.missing")).unwrap_err();
        assert!(matches!(err, CommandError::UnknownExtension(_)));
    }

    #[test]
    fn json_flattens_decision() {
        let snapshot: Snapshot = toml::from_str(SNAPSHOT).unwrap();
        let all = resolve_all(&snapshot.inputs(), &HostPolicy::default(), false);
        let selected = select(&all, Some("pub.updated")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&selected).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "pub.updated");
        assert_eq!(json[0]["server"], "local");
        assert_eq!(json[0]["reload_required"], true);
        assert_eq!(json[0]["reason"]["code"], "update-pending-reload");
        assert_eq!(
            json[0]["message"],
            "Reload required to enable the updated extension."
        );
    }
}
