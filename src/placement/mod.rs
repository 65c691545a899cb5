//! Runtime placement resolver.
//!
//! [`resolve_placement`] decides, for one installed record, whether the
//! extension is enabled, which server it should run on, whether a reload is
//! needed, and why. It is a pure function of its inputs: call it again with
//! a fresh snapshot whenever the inventory, trust or enablement changes.
mod decision;
mod targets;

pub use decision::{PlacementDecision, ReasonCode};
pub use targets::{can_host, install_targets, preferred_server};

use rayon::prelude::*;

use crate::host::ExtensionHost;
use crate::model::{
    EnablementState, ExtensionRef, InstallState, Manifest, RunningExtensionRef, Server,
    ServerSet, WorkspaceContext, WorkspaceSupport,
};

/// Everything the resolver needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct PlacementInputs<'a> {
    /// Every installed record, across all servers.
    pub installed: &'a [ExtensionRef],
    /// Extensions currently executing, across all extension hosts.
    pub running: &'a [RunningExtensionRef],
    /// Servers that exist for this window.
    pub servers: &'a ServerSet,
    /// Workspace trust and virtual-workspace state.
    pub workspace: WorkspaceContext,
}

/// A record paired with its decision.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The resolved record.
    pub extension: &'a ExtensionRef,
    /// Its decision.
    pub decision: PlacementDecision,
}

/// Builds decisions that share one preferred server.
struct Decide(Option<Server>);

impl Decide {
    const fn with(&self, enabled: bool, reload_required: bool, reason: ReasonCode) -> PlacementDecision {
        PlacementDecision {
            enabled,
            reload_required,
            reason,
            preferred_server: self.0,
        }
    }
}

/// Resolve the placement of one installed record.
///
/// Rules are evaluated in order and the first match wins:
/// malicious, deprecated, install lifecycle, missing local record,
/// environment, virtual workspace, trust, extension kind, language pack,
/// dependency, and finally the running/enabled reconciliation.
#[must_use]
pub fn resolve_placement<H>(
    ext: &ExtensionRef,
    inputs: &PlacementInputs<'_>,
    host: &H,
) -> PlacementDecision
where
    H: ExtensionHost + ?Sized,
{
    let decide = Decide(
        ext.manifest
            .as_ref()
            .and_then(|m| preferred_server(m, inputs.servers)),
    );
    let enabled = ext.enablement.is_enabled();

    if ext.malicious {
        return decide.with(false, false, ReasonCode::Malicious);
    }

    if let Some(deprecation) = &ext.deprecation {
        return decide.with(
            enabled,
            false,
            ReasonCode::Deprecated {
                replacement: deprecation.replacement.clone(),
                settings: deprecation.settings.clone(),
            },
        );
    }

    match ext.state {
        InstallState::Installing | InstallState::Uninstalling => {
            return decide.with(enabled, false, ReasonCode::InProgress);
        }
        InstallState::Uninstalled => return resolve_uninstalled(ext, inputs, host, &decide),
        InstallState::Installed => {}
    }

    let (Some(manifest), Some(server)) = (&ext.manifest, ext.server) else {
        return decide.with(false, false, ReasonCode::NotInstalled);
    };

    if let Some(decision) = resolve_restrictions(ext, manifest, inputs, &decide) {
        return decision;
    }

    if ext.enablement == EnablementState::DisabledByExtensionKind
        && let Some(decision) = resolve_wrong_kind(ext, server, inputs, &decide)
    {
        return decision;
    }

    if manifest.is_language_pack()
        && inputs.servers.remote
        && let Some(decision) = resolve_language_pack(ext, server, inputs, &decide)
    {
        return decision;
    }

    if ext.enablement == EnablementState::DisabledByExtensionDependency {
        return decide.with(false, false, ReasonCode::DependencyDisabled);
    }

    resolve_running(ext, manifest, server, inputs, host, &decide)
}

/// Environment, virtual-workspace and trust rules.
fn resolve_restrictions(
    ext: &ExtensionRef,
    manifest: &Manifest,
    inputs: &PlacementInputs<'_>,
    decide: &Decide,
) -> Option<PlacementDecision> {
    match ext.enablement {
        EnablementState::DisabledByEnvironment => {
            return Some(decide.with(false, false, ReasonCode::Environment));
        }
        EnablementState::DisabledByVirtualWorkspace => {
            return Some(decide.with(
                false,
                false,
                ReasonCode::VirtualWorkspaceUnsupported {
                    details: manifest.virtual_workspaces_description.clone(),
                },
            ));
        }
        _ => {}
    }

    if inputs.workspace.is_virtual
        && (manifest.virtual_workspaces == WorkspaceSupport::Limited
            || manifest.virtual_workspaces_description.is_some())
    {
        return Some(decide.with(
            true,
            false,
            ReasonCode::VirtualWorkspaceLimited {
                details: manifest.virtual_workspaces_description.clone(),
            },
        ));
    }

    let untrusted_details = || manifest.untrusted_workspaces_description.clone();

    if ext.enablement == EnablementState::DisabledByTrustRequirement
        || (ext.enablement == EnablementState::DisabledByExtensionDependency
            && dependencies_blocked_only_by_trust(ext, manifest, inputs.installed))
    {
        return Some(decide.with(
            true,
            false,
            ReasonCode::UntrustedWorkspace {
                details: untrusted_details(),
            },
        ));
    }

    if inputs.workspace.is_restricted()
        && (manifest.untrusted_workspaces == WorkspaceSupport::Limited
            || manifest.untrusted_workspaces_description.is_some())
    {
        return Some(decide.with(
            true,
            false,
            ReasonCode::UntrustedWorkspaceLimited {
                details: untrusted_details(),
            },
        ));
    }

    None
}

/// Whether every installed dependency is either enabled or waiting on trust.
///
/// Dependencies that are not installed are ignored, so a record with no
/// installed dependency counts as blocked only by trust.
fn dependencies_blocked_only_by_trust(
    ext: &ExtensionRef,
    manifest: &Manifest,
    installed: &[ExtensionRef],
) -> bool {
    manifest
        .dependencies
        .iter()
        .filter_map(|id| dependency_record(ext, id, installed))
        .all(|dep| {
            dep.enablement.is_enabled()
                || dep.enablement == EnablementState::DisabledByTrustRequirement
        })
}

/// The installed record for dependency `id`, preferring the dependent's server.
fn dependency_record<'a>(
    ext: &ExtensionRef,
    id: &str,
    installed: &'a [ExtensionRef],
) -> Option<&'a ExtensionRef> {
    let mut candidates = installed
        .iter()
        .filter(|e| e.identifier.id.eq_ignore_ascii_case(id));
    let first = candidates.next()?;
    if first.server == ext.server {
        return Some(first);
    }
    Some(candidates.find(|e| e.server == ext.server).unwrap_or(first))
}

/// Whether another copy of `ext` is installed on `server`.
fn installed_on(ext: &ExtensionRef, server: Server, installed: &[ExtensionRef]) -> bool {
    installed
        .iter()
        .any(|o| ext.is_copy_elsewhere(o) && o.server == Some(server))
}

/// Installed on a server whose kind the extension cannot run on.
fn resolve_wrong_kind(
    ext: &ExtensionRef,
    server: Server,
    inputs: &PlacementInputs<'_>,
    decide: &Decide,
) -> Option<PlacementDecision> {
    let Some(other) = inputs.installed.iter().find(|o| ext.is_copy_elsewhere(o)) else {
        let install_on = decide.0.filter(|preferred| *preferred != server);
        return Some(decide.with(false, false, ReasonCode::WrongServerKind { install_on }));
    };

    // The right copy was just installed but nothing is running yet.
    let other_running = inputs
        .running
        .iter()
        .any(|r| r.identifier.matches(&other.identifier));
    if other.state == InstallState::Installed && other.enablement.is_enabled() && !other_running {
        return Some(decide.with(false, true, ReasonCode::ReloadToEnable));
    }
    None
}

/// Language packs must be installed on both sides of a remote connection.
fn resolve_language_pack(
    ext: &ExtensionRef,
    server: Server,
    inputs: &PlacementInputs<'_>,
    decide: &Decide,
) -> Option<PlacementDecision> {
    let other_server = match server {
        Server::Local => Server::Remote,
        Server::Remote | Server::Web => Server::Local,
    };
    let has_copy = inputs.installed.iter().any(|o| ext.is_copy_elsewhere(o));
    if !has_copy && inputs.servers.contains(other_server) {
        return Some(decide.with(
            ext.enablement.is_enabled(),
            false,
            ReasonCode::LanguagePackMissing {
                install_on: other_server,
            },
        ));
    }
    None
}

/// Record is gone from disk but may still be executing.
fn resolve_uninstalled<H>(
    ext: &ExtensionRef,
    inputs: &PlacementInputs<'_>,
    host: &H,
    decide: &Decide,
) -> PlacementDecision
where
    H: ExtensionHost + ?Sized,
{
    let still_running = inputs.running.iter().any(|r| {
        r.identifier.matches(&ext.identifier) && ext.server.is_none_or(|s| s == r.server)
    });
    if still_running && !host.can_remove_extension(ext) {
        return decide.with(false, true, ReasonCode::ReloadToUninstall);
    }
    decide.with(false, false, ReasonCode::NotInstalled)
}

/// Reconcile the enablement state against what is actually running.
fn resolve_running<H>(
    ext: &ExtensionRef,
    manifest: &Manifest,
    server: Server,
    inputs: &PlacementInputs<'_>,
    host: &H,
    decide: &Decide,
) -> PlacementDecision
where
    H: ExtensionHost + ?Sized,
{
    let enabled = ext.enablement.is_enabled();
    let stable = if ext.enablement == EnablementState::EnabledByEnvironment {
        ReasonCode::EnabledByEnvironment
    } else {
        ReasonCode::Stable
    };

    let mut matching = inputs
        .running
        .iter()
        .filter(|r| r.identifier.matches(&ext.identifier));
    let running_here = matching.clone().find(|r| r.server == server);
    let running_elsewhere = matching.find(|r| r.server != server).map(|r| r.server);

    // Language packs are applied on reload of the window, never hot.
    if manifest.is_language_pack() {
        return decide.with(enabled, false, stable);
    }

    match (enabled, running_here) {
        (true, Some(running)) => {
            if !running.is_same_build(ext) {
                decide.with(true, true, ReasonCode::UpdatePendingReload)
            } else if decide.0.is_some_and(|preferred| {
                preferred != server && installed_on(ext, preferred, inputs.installed)
            }) {
                // The copy on the preferred server takes over after a reload.
                decide.with(true, true, ReasonCode::ReloadToEnable)
            } else {
                decide.with(true, false, stable)
            }
        }
        (true, None) => {
            if let Some(elsewhere) = running_elsewhere {
                if decide.0 == Some(server) {
                    decide.with(true, true, ReasonCode::ReloadToEnable)
                } else {
                    decide.with(true, false, ReasonCode::RunningElsewhere { server: elsewhere })
                }
            } else if !manifest.validation_errors.is_empty() {
                decide.with(
                    true,
                    false,
                    ReasonCode::Invalid {
                        errors: manifest.validation_errors.clone(),
                    },
                )
            } else if host.can_add_extension(ext) {
                decide.with(true, false, stable)
            } else {
                decide.with(true, true, ReasonCode::ReloadToEnable)
            }
        }
        (false, Some(_)) => {
            if host.can_remove_extension(ext) {
                decide.with(false, false, stable)
            } else {
                decide.with(false, true, ReasonCode::ReloadToDisable)
            }
        }
        (false, None) => match running_elsewhere {
            Some(elsewhere) => {
                decide.with(false, false, ReasonCode::RunningElsewhere { server: elsewhere })
            }
            None => decide.with(false, false, stable),
        },
    }
}

/// Resolve every installed record, keeping input order.
///
/// With `parallel` set the records are evaluated on the rayon pool; the
/// resolver holds no shared state, so both paths produce identical output.
#[must_use]
pub fn resolve_all<'a, H>(
    inputs: &PlacementInputs<'a>,
    host: &H,
    parallel: bool,
) -> Vec<Resolution<'a>>
where
    H: ExtensionHost + Sync + ?Sized,
{
    let resolve = |extension: &'a ExtensionRef| Resolution {
        extension,
        decision: resolve_placement(extension, inputs, host),
    };
    if parallel {
        inputs.installed.par_iter().map(resolve).collect()
    } else {
        inputs.installed.iter().map(resolve).collect()
    }
}
