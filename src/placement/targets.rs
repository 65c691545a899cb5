//! Preferred server selection and install-in-other-server targets.
use crate::model::{EnablementState, ExtensionRef, InstallState, Manifest, Server, ServerSet};

/// Whether `server` can host an extension with this manifest.
///
/// The local extension host also runs workspace extensions when no remote
/// server exists.
#[must_use]
pub fn can_host(manifest: &Manifest, server: Server, servers: &ServerSet) -> bool {
    match server {
        Server::Local => {
            manifest.can_execute_on_ui()
                || (!servers.remote && manifest.can_execute_on_workspace())
        }
        Server::Remote => manifest.can_execute_on_workspace(),
        Server::Web => manifest.can_execute_on_web(),
    }
}

/// Server the extension should run on, given the servers that exist.
///
/// An explicit workspace or web preference wins when that server exists;
/// otherwise the first of Local, Remote, Web that can host it.
///
/// # Examples
///
/// ```
/// use extension_placement::model::{ExtensionKind, Manifest, Server, ServerSet};
/// use extension_placement::placement::preferred_server;
///
/// let manifest = Manifest {
///     extension_kind: Some(vec![ExtensionKind::Workspace, ExtensionKind::Ui]),
///     ..Manifest::default()
/// };
/// let servers = ServerSet::new(true, true, false);
/// assert_eq!(preferred_server(&manifest, &servers), Some(Server::Remote));
/// ```
#[must_use]
pub fn preferred_server(manifest: &Manifest, servers: &ServerSet) -> Option<Server> {
    if manifest.prefers_execute_on_workspace() && servers.remote {
        return Some(Server::Remote);
    }
    if manifest.prefers_execute_on_web() && servers.web {
        return Some(Server::Web);
    }
    servers.iter().find(|s| can_host(manifest, *s, servers))
}

fn prefers(manifest: &Manifest, server: Server) -> bool {
    match server {
        Server::Local => manifest.prefers_execute_on_ui(),
        Server::Remote => manifest.prefers_execute_on_workspace(),
        Server::Web => manifest.prefers_execute_on_web(),
    }
}

fn can_install_on(manifest: &Manifest, server: Server, anywhere: bool) -> bool {
    if manifest.is_language_pack() || prefers(manifest, server) {
        return true;
    }
    anywhere
        && match server {
            Server::Local => manifest.can_execute_on_ui(),
            Server::Remote => manifest.can_execute_on_workspace(),
            Server::Web => false,
        }
}

/// Servers on which a further copy of `ext` can be installed.
///
/// With `anywhere` set, servers the extension merely *can* run on (rather
/// than prefers) also qualify for Local and Remote.
#[must_use]
pub fn install_targets(
    ext: &ExtensionRef,
    installed: &[ExtensionRef],
    servers: &ServerSet,
    anywhere: bool,
) -> Vec<Server> {
    let Some(manifest) = &ext.manifest else {
        return Vec::new();
    };
    if ext.state != InstallState::Installed
        || matches!(
            ext.enablement,
            EnablementState::DisabledByEnvironment
                | EnablementState::DisabledByTrustRequirement
                | EnablementState::DisabledByVirtualWorkspace
        )
    {
        return Vec::new();
    }

    servers
        .iter()
        .filter(|s| ext.server != Some(*s))
        .filter(|s| {
            !installed
                .iter()
                .any(|o| o.identifier.matches(&ext.identifier) && o.server == Some(*s))
        })
        .filter(|s| can_install_on(manifest, *s, anywhere))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::ExtensionKind;

    fn manifest(kinds: &[ExtensionKind]) -> Manifest {
        Manifest {
            extension_kind: Some(kinds.to_vec()),
            ..Manifest::default()
        }
    }

    // ------------------------------------------------------------------
    // preferred_server
    // ------------------------------------------------------------------

    #[test]
    fn workspace_preference_picks_remote() {
        let m = manifest(&[ExtensionKind::Workspace]);
        let servers = ServerSet::new(true, true, true);
        assert_eq!(preferred_server(&m, &servers), Some(Server::Remote));
    }

    #[test]
    fn workspace_extension_runs_locally_without_remote() {
        let m = manifest(&[ExtensionKind::Workspace]);
        let servers = ServerSet::new(true, false, false);
        assert_eq!(preferred_server(&m, &servers), Some(Server::Local));
    }

    #[test]
    fn web_preference_picks_web() {
        let m = manifest(&[ExtensionKind::Web, ExtensionKind::Ui]);
        let servers = ServerSet::new(true, false, true);
        assert_eq!(preferred_server(&m, &servers), Some(Server::Web));
    }

    #[test]
    fn default_order_is_local_first() {
        let m = manifest(&[
            ExtensionKind::Ui,
            ExtensionKind::Workspace,
            ExtensionKind::Web,
        ]);
        let servers = ServerSet::new(true, true, true);
        assert_eq!(preferred_server(&m, &servers), Some(Server::Local));
    }

    #[test]
    fn ui_extension_falls_back_to_web() {
        let m = manifest(&[ExtensionKind::Ui, ExtensionKind::Web]);
        let servers = ServerSet::new(false, true, true);
        assert_eq!(preferred_server(&m, &servers), Some(Server::Web));
    }

    #[test]
    fn no_host_yields_none() {
        let m = manifest(&[ExtensionKind::Workspace]);
        let servers = ServerSet::new(false, false, true);
        assert_eq!(preferred_server(&m, &servers), None);
    }

    #[test]
    fn no_servers_yields_none() {
        let m = Manifest::default();
        assert_eq!(preferred_server(&m, &ServerSet::default()), None);
    }

    // ------------------------------------------------------------------
    // install_targets
    // ------------------------------------------------------------------

    fn on(server: Server, kinds: &[ExtensionKind]) -> ExtensionRef {
        ExtensionRef::installed("pub.ext", "1.0.0", server, manifest(kinds))
    }

    #[test]
    fn ui_extension_on_remote_targets_local() {
        let ext = on(Server::Remote, &[ExtensionKind::Ui]);
        let installed = vec![ext.clone()];
        let servers = ServerSet::new(true, true, false);
        assert_eq!(
            install_targets(&ext, &installed, &servers, false),
            vec![Server::Local]
        );
    }

    #[test]
    fn existing_copy_is_not_a_target() {
        let ext = on(Server::Remote, &[ExtensionKind::Ui]);
        let installed = vec![ext.clone(), on(Server::Local, &[ExtensionKind::Ui])];
        let servers = ServerSet::new(true, true, false);
        assert!(install_targets(&ext, &installed, &servers, false).is_empty());
    }

    #[test]
    fn anywhere_allows_non_preferred_workspace() {
        let ext = on(Server::Local, &[ExtensionKind::Ui, ExtensionKind::Workspace]);
        let installed = vec![ext.clone()];
        let servers = ServerSet::new(true, true, false);
        assert!(install_targets(&ext, &installed, &servers, false).is_empty());
        assert_eq!(
            install_targets(&ext, &installed, &servers, true),
            vec![Server::Remote]
        );
    }

    #[test]
    fn language_pack_targets_every_other_server() {
        let mut ext = on(Server::Local, &[ExtensionKind::Ui]);
        if let Some(m) = ext.manifest.as_mut() {
            m.localizations = true;
        }
        let installed = vec![ext.clone()];
        let servers = ServerSet::new(true, true, true);
        assert_eq!(
            install_targets(&ext, &installed, &servers, false),
            vec![Server::Remote, Server::Web]
        );
    }

    #[test]
    fn trust_blocked_extension_has_no_targets() {
        let ext = on(Server::Remote, &[ExtensionKind::Ui])
            .with_enablement(EnablementState::DisabledByTrustRequirement);
        let installed = vec![ext.clone()];
        let servers = ServerSet::new(true, true, false);
        assert!(install_targets(&ext, &installed, &servers, true).is_empty());
    }

    #[test]
    fn uninstalled_extension_has_no_targets() {
        let mut ext = on(Server::Remote, &[ExtensionKind::Ui]);
        ext.state = InstallState::Uninstalled;
        let servers = ServerSet::new(true, true, false);
        assert!(install_targets(&ext, &[], &servers, true).is_empty());
    }
}
