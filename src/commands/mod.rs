pub mod check;
pub mod resolve;
pub mod targets;
pub mod version;
pub mod watch;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::validation::{self, ValidationWarning};
use crate::config::{FileSource, Snapshot, SnapshotSource};
use crate::logging::{Log, Logger, Outcome};
use crate::model::ExtensionRef;
use crate::placement::{self, PlacementDecision, ReasonCode, Resolution};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    pub snapshot: Snapshot,
    pub warnings: Vec<ValidationWarning>,
    pub parallel: bool,
}

impl CommandSetup {
    /// Load the snapshot named by `--snapshot` and log validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is missing or malformed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let source = FileSource::new(&global.snapshot);
        log.stage(&format!("Loading {}", source.path().display()));
        Self::from_source(&source, global.parallel, log)
    }

    /// Load from any snapshot source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a snapshot.
    pub fn from_source(source: &dyn SnapshotSource, parallel: bool, log: &dyn Log) -> Result<Self> {
        let snapshot = source.load().context("loading inventory snapshot")?;
        log.debug(&format!("{} installed records", snapshot.installed.len()));
        log.debug(&format!("{} running extensions", snapshot.running.len()));
        log.debug(&format!(
            "servers: {}",
            snapshot
                .servers
                .iter()
                .map(|s| snapshot.servers.label(s))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        let warnings = validation::validate_all(&snapshot);
        log_warnings(&warnings, log);

        Ok(Self {
            snapshot,
            warnings,
            parallel,
        })
    }

    /// Resolve every installed record against the snapshot's host policy.
    #[must_use]
    pub fn resolve(&self) -> Vec<Resolution<'_>> {
        placement::resolve_all(&self.snapshot.inputs(), &self.snapshot.host, self.parallel)
    }
}

fn log_warnings(warnings: &[ValidationWarning], log: &dyn Log) {
    if warnings.is_empty() {
        return;
    }
    log.warn(&format!("found {} snapshot warning(s):", warnings.len()));
    for warning in warnings {
        log.warn(&format!("  {warning}"));
    }
}

/// `id@server` label used in summaries and change reports.
#[must_use]
pub fn record_name(ext: &ExtensionRef) -> String {
    ext.server.map_or_else(
        || ext.identifier.id.clone(),
        |server| format!("{}@{server}", ext.identifier.id),
    )
}

/// Summary bucket for a decision.
#[must_use]
pub const fn outcome(decision: &PlacementDecision) -> Outcome {
    if decision.reload_required {
        return Outcome::Reload;
    }
    match decision.reason {
        ReasonCode::Malicious
        | ReasonCode::Deprecated { .. }
        | ReasonCode::WrongServerKind { .. }
        | ReasonCode::LanguagePackMissing { .. }
        | ReasonCode::UntrustedWorkspace { .. }
        | ReasonCode::DependencyDisabled
        | ReasonCode::Invalid { .. } => Outcome::Attention,
        _ if !decision.enabled => Outcome::Disabled,
        _ => Outcome::Ok,
    }
}

/// Record every resolution in the logger for the summary.
pub fn record_all(resolutions: &[&Resolution<'_>], log: &dyn Log) {
    for r in resolutions {
        let name = record_name(r.extension);
        log.debug(&format!("{name}: {}", r.decision.reason.name()));
        log.record(&name, outcome(&r.decision), Some(&r.decision.message()));
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::source::MockSnapshotSource;
    use crate::logging::isolated_logger;
    use crate::model::{Manifest, Server};

    fn decision(enabled: bool, reload: bool, reason: ReasonCode) -> PlacementDecision {
        PlacementDecision {
            enabled,
            reload_required: reload,
            reason,
            preferred_server: None,
        }
    }

    #[test]
    fn reload_wins_over_reason() {
        let d = decision(true, true, ReasonCode::UpdatePendingReload);
        assert_eq!(outcome(&d), Outcome::Reload);
    }

    #[test]
    fn actionable_reasons_need_attention() {
        let d = decision(true, false, ReasonCode::UntrustedWorkspace { details: None });
        assert_eq!(outcome(&d), Outcome::Attention);
        let d = decision(false, false, ReasonCode::WrongServerKind { install_on: None });
        assert_eq!(outcome(&d), Outcome::Attention);
    }

    #[test]
    fn disabled_and_stable() {
        assert_eq!(
            outcome(&decision(false, false, ReasonCode::Stable)),
            Outcome::Disabled
        );
        assert_eq!(
            outcome(&decision(true, false, ReasonCode::Stable)),
            Outcome::Ok
        );
    }

    #[test]
    fn record_name_includes_server() {
        let ext = ExtensionRef::installed("pub.ext", "1.0.0", Server::Remote, Manifest::default());
        assert_eq!(record_name(&ext), "pub.ext@remote");
        let mut gone = ext;
        gone.server = None;
        assert_eq!(record_name(&gone), "pub.ext");
    }

    #[test]
    fn from_source_collects_warnings() {
        let (log, _tmp, _guard) = isolated_logger();
        let mut source = MockSnapshotSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(toml::from_str("[[installed]]\nid = \"a.b\"\nserver = \"web\"\n").unwrap())
        });
        let setup = CommandSetup::from_source(&source, false, &log).unwrap();
        assert_eq!(setup.warnings.len(), 1);
        assert_eq!(setup.resolve().len(), 1);
    }

    #[test]
    fn from_source_propagates_errors() {
        let (log, _tmp, _guard) = isolated_logger();
        let mut source = MockSnapshotSource::new();
        source.expect_load().times(1).returning(|| {
            Err(crate::error::SnapshotError::NotFound {
                path: "gone.toml".into(),
            })
        });
        let err = CommandSetup::from_source(&source, true, &log).unwrap_err();
        assert!(format!("{err:#}").contains("gone.toml"));
        assert!(err.downcast_ref::<crate::error::SnapshotError>().is_some());
    }
}
