//! Placement decision values and their human-readable messages.
use std::fmt;

use serde::Serialize;

use crate::model::Server;

/// Why an extension is in its current placement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum ReasonCode {
    /// Reported as problematic by the gallery.
    Malicious,
    /// Deprecated; advisory only.
    Deprecated {
        /// Id of the replacement extension.
        #[serde(skip_serializing_if = "Option::is_none")]
        replacement: Option<String>,
        /// Settings that provide the functionality built in.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        settings: Vec<String>,
    },
    /// No installed record exists.
    NotInstalled,
    /// Install or uninstall in progress.
    InProgress,
    /// Disabled by the environment; needs a host restart with other flags.
    Environment,
    /// Force-enabled by the environment.
    EnabledByEnvironment,
    /// Disabled because virtual workspaces are not supported.
    VirtualWorkspaceUnsupported {
        /// Manifest-supplied explanation.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Running with reduced features in a virtual workspace.
    VirtualWorkspaceLimited {
        /// Manifest-supplied explanation.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Needs workspace trust before it can run.
    UntrustedWorkspace {
        /// Manifest-supplied explanation.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Running with reduced features in an untrusted workspace.
    UntrustedWorkspaceLimited {
        /// Manifest-supplied explanation.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Installed on a server whose kind it cannot run on.
    WrongServerKind {
        /// Server to install a copy on, if any can host it.
        #[serde(skip_serializing_if = "Option::is_none")]
        install_on: Option<Server>,
    },
    /// Language pack missing on the other side of a remote connection.
    LanguagePackMissing {
        /// Server that lacks a copy.
        install_on: Server,
    },
    /// Disabled because a dependency is disabled.
    DependencyDisabled,
    /// Needs a reload before it starts running.
    ReloadToEnable,
    /// Needs a reload before it stops running.
    ReloadToDisable,
    /// Uninstalled but still running until a reload.
    ReloadToUninstall,
    /// An older build is running; a reload picks up the installed one.
    UpdatePendingReload,
    /// Another copy of the extension runs on a different server.
    RunningElsewhere {
        /// Server whose extension host runs the other copy.
        server: Server,
    },
    /// Enabled but cannot start because the manifest failed validation.
    Invalid {
        /// Validation error messages.
        errors: Vec<String>,
    },
    /// Nothing to reconcile.
    Stable,
}

impl ReasonCode {
    /// Short kebab-case name of the variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Malicious => "malicious",
            Self::Deprecated { .. } => "deprecated",
            Self::NotInstalled => "not-installed",
            Self::InProgress => "in-progress",
            Self::Environment => "environment",
            Self::EnabledByEnvironment => "enabled-by-environment",
            Self::VirtualWorkspaceUnsupported { .. } => "virtual-workspace-unsupported",
            Self::VirtualWorkspaceLimited { .. } => "virtual-workspace-limited",
            Self::UntrustedWorkspace { .. } => "untrusted-workspace",
            Self::UntrustedWorkspaceLimited { .. } => "untrusted-workspace-limited",
            Self::WrongServerKind { .. } => "wrong-server-kind",
            Self::LanguagePackMissing { .. } => "language-pack-missing",
            Self::DependencyDisabled => "dependency-disabled",
            Self::ReloadToEnable => "reload-to-enable",
            Self::ReloadToDisable => "reload-to-disable",
            Self::ReloadToUninstall => "reload-to-uninstall",
            Self::UpdatePendingReload => "update-pending-reload",
            Self::RunningElsewhere { .. } => "running-elsewhere",
            Self::Invalid { .. } => "invalid",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malicious => write!(f, "This extension was reported to be problematic."),
            Self::Deprecated {
                replacement: Some(id),
                ..
            } => write!(f, "This extension is deprecated. Use the {id} extension instead."),
            Self::Deprecated {
                replacement: None,
                settings,
            } if !settings.is_empty() => write!(
                f,
                "This extension is deprecated because its functionality is now built in. Configure these settings instead: {}.",
                settings.join(", ")
            ),
            Self::Deprecated { .. } => write!(
                f,
                "This extension is deprecated as it is no longer being maintained."
            ),
            Self::NotInstalled => write!(f, "This extension is not installed."),
            Self::InProgress => write!(f, "An install or uninstall is in progress."),
            Self::Environment => write!(f, "This extension is disabled by the environment."),
            Self::EnabledByEnvironment => write!(
                f,
                "This extension is enabled because it is required in the current environment."
            ),
            Self::VirtualWorkspaceUnsupported { details } => details_or(
                f,
                details.as_deref(),
                "This extension has been disabled because it does not support virtual workspaces.",
            ),
            Self::VirtualWorkspaceLimited { details } => details_or(
                f,
                details.as_deref(),
                "This extension has limited features because the current workspace is virtual.",
            ),
            Self::UntrustedWorkspace { details } => details_or(
                f,
                details.as_deref(),
                "This extension has been disabled because the current workspace is not trusted.",
            ),
            Self::UntrustedWorkspaceLimited { details } => details_or(
                f,
                details.as_deref(),
                "This extension has limited features because the current workspace is not trusted.",
            ),
            Self::WrongServerKind {
                install_on: Some(server),
            } => write!(
                f,
                "This extension is disabled because it is defined to run on the {server} server. Install it there to enable it."
            ),
            Self::WrongServerKind { install_on: None } => write!(
                f,
                "This extension is disabled because no available server can run it."
            ),
            Self::LanguagePackMissing { install_on } => write!(
                f,
                "Install the language pack extension on the {install_on} server to enable it there also."
            ),
            Self::DependencyDisabled => write!(
                f,
                "This extension has been disabled because it depends on an extension that is disabled."
            ),
            Self::ReloadToEnable => write!(f, "Reload required to enable this extension."),
            Self::ReloadToDisable => write!(f, "Reload required to disable this extension."),
            Self::ReloadToUninstall => write!(
                f,
                "Reload required to complete the uninstallation of this extension."
            ),
            Self::UpdatePendingReload => write!(
                f,
                "Reload required to enable the updated extension."
            ),
            Self::RunningElsewhere { server } => write!(
                f,
                "This extension is running in the {server} extension host."
            ),
            Self::Invalid { errors } => write!(f, "{}", errors.join(" ").trim()),
            Self::Stable => write!(f, "Up to date."),
        }
    }
}

fn details_or(f: &mut fmt::Formatter<'_>, details: Option<&str>, fallback: &str) -> fmt::Result {
    f.write_str(details.unwrap_or(fallback))
}

/// Outcome of resolving one extension record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementDecision {
    /// The extension is enabled (or actionable, for trust-gated states).
    pub enabled: bool,
    /// A reload is needed to reconcile desired and actual placement.
    pub reload_required: bool,
    /// Why the extension is in this state.
    pub reason: ReasonCode,
    /// Server the extension should run on, derived from its manifest.
    pub preferred_server: Option<Server>,
}

impl PlacementDecision {
    /// Human-readable status message.
    #[must_use]
    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}
