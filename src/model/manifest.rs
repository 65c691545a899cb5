//! Manifest capabilities and the execution-kind predicates derived from them.
use serde::{Deserialize, Serialize};

/// Where an extension's code is able to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    /// Runs next to the UI (local extension host).
    Ui,
    /// Runs where the workspace lives (remote extension host).
    Workspace,
    /// Runs in a web worker.
    Web,
}

/// Level of support an extension declares for a restricted workspace mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceSupport {
    /// Not supported; the extension is disabled in this mode.
    None,
    /// Supported with reduced functionality.
    Limited,
    /// Fully supported.
    #[default]
    Full,
}

/// Capabilities read from an extension's manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Manifest {
    /// Declared execution kinds, in preference order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_kind: Option<Vec<ExtensionKind>>,
    /// The manifest has a `main` (Node) entry point.
    #[serde(default)]
    pub main: bool,
    /// The manifest has a `browser` entry point.
    #[serde(default)]
    pub browser: bool,
    /// Virtual workspace support.
    #[serde(default)]
    pub virtual_workspaces: WorkspaceSupport,
    /// Free-form explanation shown when running in a virtual workspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_workspaces_description: Option<String>,
    /// Untrusted workspace support.
    #[serde(default)]
    pub untrusted_workspaces: WorkspaceSupport,
    /// Free-form explanation shown when the workspace is untrusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untrusted_workspaces_description: Option<String>,
    /// The extension contributes localizations (a language pack).
    #[serde(default)]
    pub localizations: bool,
    /// Ids of extensions this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Errors reported while validating the installed manifest.
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl Manifest {
    /// Effective execution kinds in preference order.
    ///
    /// An explicit non-empty `extension_kind` list is used as-is. Otherwise
    /// the kinds are deduced from the entry points.
    #[must_use]
    pub fn kinds(&self) -> Vec<ExtensionKind> {
        if let Some(kinds) = &self.extension_kind
            && !kinds.is_empty()
        {
            return kinds.clone();
        }
        match (self.main, self.browser) {
            (true, true) => vec![ExtensionKind::Workspace, ExtensionKind::Web],
            (true, false) => vec![ExtensionKind::Workspace],
            (false, true) => vec![ExtensionKind::Web],
            (false, false) => vec![
                ExtensionKind::Ui,
                ExtensionKind::Workspace,
                ExtensionKind::Web,
            ],
        }
    }

    fn prefers(&self, kind: ExtensionKind) -> bool {
        self.kinds().first() == Some(&kind)
    }

    fn can_execute(&self, kind: ExtensionKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// The first declared kind is `ui`.
    #[must_use]
    pub fn prefers_execute_on_ui(&self) -> bool {
        self.prefers(ExtensionKind::Ui)
    }

    /// The first declared kind is `workspace`.
    #[must_use]
    pub fn prefers_execute_on_workspace(&self) -> bool {
        self.prefers(ExtensionKind::Workspace)
    }

    /// The first declared kind is `web`.
    #[must_use]
    pub fn prefers_execute_on_web(&self) -> bool {
        self.prefers(ExtensionKind::Web)
    }

    /// The extension can run in the local extension host.
    #[must_use]
    pub fn can_execute_on_ui(&self) -> bool {
        self.can_execute(ExtensionKind::Ui)
    }

    /// The extension can run in the remote extension host.
    #[must_use]
    pub fn can_execute_on_workspace(&self) -> bool {
        self.can_execute(ExtensionKind::Workspace)
    }

    /// The extension can run in a web worker.
    #[must_use]
    pub fn can_execute_on_web(&self) -> bool {
        self.can_execute(ExtensionKind::Web)
    }

    /// The extension is a language pack.
    #[must_use]
    pub const fn is_language_pack(&self) -> bool {
        self.localizations
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn with_kinds(kinds: &[ExtensionKind]) -> Manifest {
        Manifest {
            extension_kind: Some(kinds.to_vec()),
            ..Manifest::default()
        }
    }

    #[test]
    fn explicit_kinds_are_used_in_order() {
        let m = with_kinds(&[ExtensionKind::Workspace, ExtensionKind::Ui]);
        assert!(m.prefers_execute_on_workspace());
        assert!(!m.prefers_execute_on_ui());
        assert!(m.can_execute_on_ui());
        assert!(!m.can_execute_on_web());
    }

    #[test]
    fn main_entry_point_deduces_workspace() {
        let m = Manifest {
            main: true,
            ..Manifest::default()
        };
        assert_eq!(m.kinds(), vec![ExtensionKind::Workspace]);
    }

    #[test]
    fn main_and_browser_deduce_workspace_then_web() {
        let m = Manifest {
            main: true,
            browser: true,
            ..Manifest::default()
        };
        assert_eq!(m.kinds(), vec![ExtensionKind::Workspace, ExtensionKind::Web]);
    }

    #[test]
    fn browser_only_deduces_web() {
        let m = Manifest {
            browser: true,
            ..Manifest::default()
        };
        assert!(m.prefers_execute_on_web());
        assert!(!m.can_execute_on_workspace());
    }

    #[test]
    fn declarative_extension_runs_anywhere() {
        let m = Manifest::default();
        assert!(m.can_execute_on_ui());
        assert!(m.can_execute_on_workspace());
        assert!(m.can_execute_on_web());
        assert!(m.prefers_execute_on_ui());
    }

    #[test]
    fn empty_explicit_list_falls_back_to_deduction() {
        let m = Manifest {
            extension_kind: Some(Vec::new()),
            main: true,
            ..Manifest::default()
        };
        assert_eq!(m.kinds(), vec![ExtensionKind::Workspace]);
    }

    #[test]
    fn workspace_support_defaults_to_full() {
        let m: Manifest = toml::from_str("").unwrap();
        assert_eq!(m.virtual_workspaces, WorkspaceSupport::Full);
        assert_eq!(m.untrusted_workspaces, WorkspaceSupport::Full);
    }

    #[test]
    fn deserializes_kebab_fields() {
        let m: Manifest = toml::from_str(
            r#"extension_kind = ["ui", "workspace"]
virtual_workspaces = "limited"
untrusted_workspaces = "none"
localizations = true
"#,
        )
        .unwrap();
        assert!(m.prefers_execute_on_ui());
        assert_eq!(m.virtual_workspaces, WorkspaceSupport::Limited);
        assert_eq!(m.untrusted_workspaces, WorkspaceSupport::None);
        assert!(m.is_language_pack());
    }
}
