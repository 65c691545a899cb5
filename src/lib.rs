//! Extension runtime placement resolver.
//!
//! Given the installed records of an extension across local, remote and web
//! extension servers, the extensions currently running, and the workspace's
//! trust state, decides for each record whether it is enabled, which server
//! it should run on, whether a window reload is needed, and why.
//!
//! The public API is organised into layers:
//!
//! - **[`model`]**: identifiers, manifests, servers, enablement and install state
//! - **[`placement`]**: the pure resolver and install-target selection
//! - **[`host`]**: the extension host capability seam
//! - **[`status`]**: change suppression and transient status labels
//! - **[`config`]**: TOML inventory snapshots and their validation
//! - **[`commands`]**: `resolve`, `check`, `targets` and `watch`
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod model;
pub mod placement;
pub mod status;
