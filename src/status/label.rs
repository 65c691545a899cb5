//! Transient status labels for lifecycle and enablement transitions.
use std::fmt;

use serde::Serialize;

use crate::model::{EnablementState, ExtensionRef, InstallState};

/// Lifecycle facts of one record at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionSnapshot {
    /// Lifecycle state when the record was first observed.
    pub initial_state: InstallState,
    /// Current lifecycle state.
    pub state: InstallState,
    /// Current enablement state.
    pub enablement: EnablementState,
}

impl ExtensionSnapshot {
    /// First observation of `ext`.
    #[must_use]
    pub const fn first(ext: &ExtensionRef) -> Self {
        Self {
            initial_state: ext.state,
            state: ext.state,
            enablement: ext.enablement,
        }
    }

    /// Next observation of `ext`, keeping the initial state.
    #[must_use]
    pub const fn next(&self, ext: &ExtensionRef) -> Self {
        // An uninstall resets the baseline so a reinstall reads as installed.
        let initial_state = if matches!(self.state, InstallState::Uninstalled) {
            InstallState::Uninstalled
        } else {
            self.initial_state
        };
        Self {
            initial_state,
            state: ext.state,
            enablement: ext.enablement,
        }
    }
}

/// Short label shown after a change took effect without a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    /// Newly installed and running.
    Installed,
    /// Reinstalled over an existing copy and running.
    Updated,
    /// Uninstalled and stopped.
    Uninstalled,
    /// Enabled and running.
    Enabled,
    /// Disabled and stopped.
    Disabled,
}

impl StatusLabel {
    /// Label for the move from `previous` to `current`, if any.
    ///
    /// Lifecycle transitions win over enablement transitions. A transition
    /// the host cannot apply hot produces no label; the reload decision
    /// covers it instead.
    #[must_use]
    pub fn transition(
        previous: &ExtensionSnapshot,
        current: &ExtensionSnapshot,
        can_add: bool,
        can_remove: bool,
    ) -> Option<Self> {
        match (previous.state, current.state) {
            (InstallState::Installing, InstallState::Installed) => {
                return can_add.then_some(
                    if current.initial_state == InstallState::Installed {
                        Self::Updated
                    } else {
                        Self::Installed
                    },
                );
            }
            (InstallState::Uninstalling, InstallState::Uninstalled) => {
                return can_remove.then_some(Self::Uninstalled);
            }
            _ => {}
        }

        match (previous.enablement.is_enabled(), current.enablement.is_enabled()) {
            (false, true) => can_add.then_some(Self::Enabled),
            (true, false) => can_remove.then_some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Installed => "Installed",
            Self::Updated => "Updated",
            Self::Uninstalled => "Uninstalled",
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        };
        f.write_str(label)
    }
}
