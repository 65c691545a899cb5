//! Facts about extensions, servers and the workspace that the resolver consumes.
mod enablement;
mod extension;
mod identifier;
mod manifest;
mod server;

pub use enablement::EnablementState;
pub use extension::{
    Deprecation, ExtensionRef, InstallState, RunningExtensionRef, WorkspaceContext,
};
pub use identifier::ExtensionIdentifier;
pub use manifest::{ExtensionKind, Manifest, WorkspaceSupport};
pub use server::{Server, ServerSet};
