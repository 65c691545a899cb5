//! Non-fatal consistency checks on a loaded snapshot.
use std::collections::HashSet;
use std::fmt;

use super::Snapshot;

/// A validation warning detected after loading a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Snapshot section the warning refers to (e.g. "installed", "running").
    pub section: String,
    /// The specific record that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.section, self.item, self.message)
    }
}

/// A single snapshot check.
pub trait SnapshotValidator {
    /// Check the snapshot and return any warnings found.
    fn validate(&self, snapshot: &Snapshot) -> Vec<ValidationWarning>;

    /// Short name of the check.
    fn name(&self) -> &'static str;
}

/// More than one installed record for the same id on the same server.
#[derive(Debug)]
pub struct DuplicateRecordValidator;

impl SnapshotValidator for DuplicateRecordValidator {
    fn validate(&self, snapshot: &Snapshot) -> Vec<ValidationWarning> {
        let mut seen = HashSet::new();
        let mut warnings = Vec::new();
        for ext in &snapshot.installed {
            let server = ext.server.map_or_else(|| "none".to_string(), |s| s.to_string());
            if !seen.insert((ext.identifier.key(), server.clone())) {
                warnings.push(ValidationWarning::new(
                    "installed",
                    &ext.identifier.id,
                    format!("duplicate record on server {server}; the first one wins"),
                ));
            }
        }
        warnings
    }

    fn name(&self) -> &'static str {
        "duplicates"
    }
}

/// Installed or running records that name a server the window does not have.
#[derive(Debug)]
pub struct ServerAvailabilityValidator;

impl SnapshotValidator for ServerAvailabilityValidator {
    fn validate(&self, snapshot: &Snapshot) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        for ext in &snapshot.installed {
            if let Some(server) = ext.server
                && !snapshot.servers.contains(server)
            {
                warnings.push(ValidationWarning::new(
                    "installed",
                    &ext.identifier.id,
                    format!("installed on absent server {server}"),
                ));
            }
        }
        for running in &snapshot.running {
            if !snapshot.servers.contains(running.server) {
                warnings.push(ValidationWarning::new(
                    "running",
                    &running.identifier.id,
                    format!("running on absent server {}", running.server),
                ));
            }
        }
        warnings
    }

    fn name(&self) -> &'static str {
        "servers"
    }
}

/// Manifest dependencies that no installed record provides.
#[derive(Debug)]
pub struct DependencyValidator;

impl SnapshotValidator for DependencyValidator {
    fn validate(&self, snapshot: &Snapshot) -> Vec<ValidationWarning> {
        let known: HashSet<String> = snapshot
            .installed
            .iter()
            .map(|e| e.identifier.key())
            .collect();
        snapshot
            .installed
            .iter()
            .filter_map(|e| e.manifest.as_ref().map(|m| (e, m)))
            .flat_map(|(e, m)| {
                m.dependencies
                    .iter()
                    .filter(|dep| !known.contains(&dep.to_lowercase()))
                    .map(move |dep| {
                        ValidationWarning::new(
                            "installed",
                            &e.identifier.id,
                            format!("dependency {dep} is not installed"),
                        )
                    })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "dependencies"
    }
}

/// Run every validator against `snapshot`.
#[must_use]
pub fn validate_all(snapshot: &Snapshot) -> Vec<ValidationWarning> {
    let validators: [&dyn SnapshotValidator; 3] = [
        &DuplicateRecordValidator,
        &ServerAvailabilityValidator,
        &DependencyValidator,
    ];
    validators
        .iter()
        .flat_map(|v| v.validate(snapshot))
        .collect()
}
