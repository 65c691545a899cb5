//! Installed and running extension records.
use serde::{Deserialize, Serialize};

use super::{EnablementState, ExtensionIdentifier, Manifest, Server};

fn universal() -> String {
    "universal".to_string()
}

/// Install lifecycle of an extension record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    /// An install is in progress.
    Installing,
    /// Installed and idle.
    #[default]
    Installed,
    /// An uninstall is in progress.
    Uninstalling,
    /// Removed from disk; the record lingers until the view refreshes.
    Uninstalled,
}

/// Deprecation metadata published for an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    /// Id of the extension that replaces this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Setting keys that now provide this functionality built in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<String>,
}

/// An extension as the inventory knows it on one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRef {
    /// Extension identity.
    #[serde(flatten)]
    pub identifier: ExtensionIdentifier,
    /// Installed version.
    #[serde(default)]
    pub version: String,
    /// Target platform the installed build was made for.
    #[serde(default = "universal")]
    pub target_platform: String,
    /// Server the record is installed on.
    #[serde(default)]
    pub server: Option<Server>,
    /// Local manifest; absent when there is no installed record.
    #[serde(default)]
    pub manifest: Option<Manifest>,
    /// Current enablement state.
    #[serde(default)]
    pub enablement: EnablementState,
    /// Install lifecycle state.
    #[serde(default)]
    pub state: InstallState,
    /// Reported as problematic by the gallery.
    #[serde(default)]
    pub malicious: bool,
    /// Deprecation metadata, if any.
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
}

impl ExtensionRef {
    /// Create an installed, globally enabled record on `server`.
    #[must_use]
    pub fn installed(id: &str, version: &str, server: Server, manifest: Manifest) -> Self {
        Self {
            identifier: ExtensionIdentifier::new(id),
            version: version.to_string(),
            target_platform: universal(),
            server: Some(server),
            manifest: Some(manifest),
            enablement: EnablementState::EnabledGlobally,
            state: InstallState::Installed,
            malicious: false,
            deprecation: None,
        }
    }

    /// Replace the enablement state.
    #[must_use]
    pub const fn with_enablement(mut self, enablement: EnablementState) -> Self {
        self.enablement = enablement;
        self
    }

    /// Whether `other` is a copy of the same extension on a different server.
    #[must_use]
    pub fn is_copy_elsewhere(&self, other: &Self) -> bool {
        self.identifier.matches(&other.identifier) && self.server != other.server
    }
}

/// An extension currently executing in an extension host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningExtensionRef {
    /// Extension identity.
    #[serde(flatten)]
    pub identifier: ExtensionIdentifier,
    /// Running version.
    #[serde(default)]
    pub version: String,
    /// Target platform of the running build.
    #[serde(default = "universal")]
    pub target_platform: String,
    /// Server whose extension host runs it.
    pub server: Server,
}

impl RunningExtensionRef {
    /// Create a running record.
    #[must_use]
    pub fn new(id: &str, version: &str, server: Server) -> Self {
        Self {
            identifier: ExtensionIdentifier::new(id),
            version: version.to_string(),
            target_platform: universal(),
            server,
        }
    }

    /// Whether this running copy is the build described by `ext`.
    #[must_use]
    pub fn is_same_build(&self, ext: &ExtensionRef) -> bool {
        self.version == ext.version && self.target_platform == ext.target_platform
    }
}

/// Workspace trust and virtual-workspace facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceContext {
    /// Workspace trust is enabled in this host.
    #[serde(default)]
    pub trust_enabled: bool,
    /// The workspace is trusted.
    #[serde(default = "default_trusted")]
    pub trusted: bool,
    /// The workspace is virtual (backed by a non-file file system).
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

const fn default_trusted() -> bool {
    true
}

impl Default for WorkspaceContext {
    fn default() -> Self {
        Self {
            trust_enabled: false,
            trusted: true,
            is_virtual: false,
        }
    }
}

impl WorkspaceContext {
    /// Trust is enforced and the workspace is not trusted.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        self.trust_enabled && !self.trusted
    }
}
