//! Extension host runtime seam.
//!
//! Whether an extension host can start or stop an extension without a full
//! restart is host policy. The resolver only asks through [`ExtensionHost`];
//! [`HostPolicy`] is the snapshot-driven implementation used by the CLI.
use serde::{Deserialize, Serialize};

use crate::model::ExtensionRef;

/// Hot add/remove capability checks supplied by the host runtime.
#[cfg_attr(test, mockall::automock)]
pub trait ExtensionHost {
    /// Whether the host can start `extension` without a reload.
    fn can_add_extension(&self, extension: &ExtensionRef) -> bool;

    /// Whether the host can stop `extension` without a reload.
    fn can_remove_extension(&self, extension: &ExtensionRef) -> bool;
}

const fn yes() -> bool {
    true
}

/// Host policy read from the `[host]` section of a snapshot.
///
/// # Examples
///
/// ```
/// use extension_placement::host::{ExtensionHost, HostPolicy};
/// use extension_placement::model::{ExtensionRef, Manifest, Server};
///
/// let policy = HostPolicy {
///     pinned: vec!["ms-vscode.cpptools".into()],
///     ..HostPolicy::default()
/// };
/// let ext = ExtensionRef::installed("MS-VSCode.cpptools", "1.0.0", Server::Local, Manifest::default());
/// assert!(!policy.can_add_extension(&ext));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPolicy {
    /// The host can start extensions without a reload.
    #[serde(default = "yes")]
    pub hot_add: bool,
    /// The host can stop extensions without a reload.
    #[serde(default = "yes")]
    pub hot_remove: bool,
    /// Extensions that always need a reload to start or stop.
    #[serde(default)]
    pub pinned: Vec<String>,
}

impl Default for HostPolicy {
    fn default() -> Self {
        Self {
            hot_add: true,
            hot_remove: true,
            pinned: Vec::new(),
        }
    }
}

impl HostPolicy {
    fn is_pinned(&self, extension: &ExtensionRef) -> bool {
        self.pinned
            .iter()
            .any(|id| id.eq_ignore_ascii_case(&extension.identifier.id))
    }
}

impl ExtensionHost for HostPolicy {
    fn can_add_extension(&self, extension: &ExtensionRef) -> bool {
        self.hot_add && !self.is_pinned(extension)
    }

    fn can_remove_extension(&self, extension: &ExtensionRef) -> bool {
        self.hot_remove && !self.is_pinned(extension)
    }
}
