//! Enablement state of an installed extension.
use serde::{Deserialize, Serialize};

/// The authoritative reason an extension is or is not permitted to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnablementState {
    /// Enabled for every workspace.
    #[default]
    EnabledGlobally,
    /// Enabled for this workspace by the user.
    EnabledWorkspace,
    /// Disabled for every workspace by the user.
    DisabledGlobally,
    /// Disabled for this workspace by the user.
    DisabledWorkspace,
    /// Installed on a server whose kind the extension cannot run on.
    DisabledByExtensionKind,
    /// A dependency is disabled.
    DisabledByExtensionDependency,
    /// Disabled by the environment (command-line flags, policy).
    DisabledByEnvironment,
    /// Force-enabled by the environment.
    EnabledByEnvironment,
    /// Does not support virtual workspaces.
    DisabledByVirtualWorkspace,
    /// Requires a trusted workspace.
    DisabledByTrustRequirement,
}

impl EnablementState {
    /// Whether the state permits the extension to run.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(
            self,
            Self::EnabledGlobally | Self::EnabledWorkspace | Self::EnabledByEnvironment
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn enabled_variants() {
        assert!(EnablementState::EnabledGlobally.is_enabled());
        assert!(EnablementState::EnabledWorkspace.is_enabled());
        assert!(EnablementState::EnabledByEnvironment.is_enabled());
    }

    #[test]
    fn disabled_variants() {
        for state in [
            EnablementState::DisabledGlobally,
            EnablementState::DisabledWorkspace,
            EnablementState::DisabledByExtensionKind,
            EnablementState::DisabledByExtensionDependency,
            EnablementState::DisabledByEnvironment,
            EnablementState::DisabledByVirtualWorkspace,
            EnablementState::DisabledByTrustRequirement,
        ] {
            assert!(!state.is_enabled(), "{state:?} should be disabled");
        }
    }

    #[test]
    fn deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            state: EnablementState,
        }
        let w: Wrapper = toml::from_str("state = \"disabled-by-trust-requirement\"").unwrap();
        assert_eq!(w.state, EnablementState::DisabledByTrustRequirement);
    }
}
