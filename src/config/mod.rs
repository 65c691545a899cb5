//! Inventory snapshots: the facts the resolver runs against.
pub mod source;
pub mod toml_loader;
pub mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::host::HostPolicy;
use crate::model::{ExtensionRef, RunningExtensionRef, ServerSet, WorkspaceContext};
use crate::placement::PlacementInputs;

pub use source::{FileSource, SnapshotSource};

const fn local_only() -> ServerSet {
    ServerSet::new(true, false, false)
}

/// Everything known about one window at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Servers that exist; a missing section means local only.
    #[serde(default = "local_only")]
    pub servers: ServerSet,
    /// Workspace trust and virtual-workspace facts.
    #[serde(default)]
    pub workspace: WorkspaceContext,
    /// Hot add/remove policy of the extension hosts.
    #[serde(default)]
    pub host: HostPolicy,
    /// Installed records across every server.
    #[serde(default)]
    pub installed: Vec<ExtensionRef>,
    /// Currently running extensions across every host.
    #[serde(default)]
    pub running: Vec<RunningExtensionRef>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            servers: local_only(),
            workspace: WorkspaceContext::default(),
            host: HostPolicy::default(),
            installed: Vec::new(),
            running: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Load a snapshot from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        toml_loader::load_toml(path)
    }

    /// Resolver inputs borrowing from this snapshot.
    #[must_use]
    pub fn inputs(&self) -> PlacementInputs<'_> {
        PlacementInputs {
            installed: &self.installed,
            running: &self.running,
            servers: &self.servers,
            workspace: self.workspace,
        }
    }

    /// Installed records whose id matches `id` (case-insensitive).
    pub fn find<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ExtensionRef> + 'a {
        self.installed
            .iter()
            .filter(move |e| e.identifier.id.eq_ignore_ascii_case(id))
    }
}
