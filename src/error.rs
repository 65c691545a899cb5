//! Domain-specific error types.
//!
//! Internal modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?`.
//! The resolver itself is total and has no error type.
//!
//! # Error hierarchy
//!
//! ```text
//! PlacementError
//! ├── Snapshot(SnapshotError)  snapshot file I/O and parsing
//! └── Command(CommandError)    subcommand preconditions and outcomes
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type, convertible to [`anyhow::Error`].
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Snapshot could not be loaded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A subcommand could not complete.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors from reading and parsing an inventory snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot file does not exist.
    #[error("Snapshot file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The snapshot file could not be read.
    #[error("IO error reading snapshot {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot is not valid TOML or does not match the schema.
    #[error("Invalid snapshot {}: {source}", path.display())]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Errors raised by subcommands.
#[derive(Error, Debug)]
pub enum CommandError {
    /// No installed record matches the requested identifier.
    #[error("No installed extension matches '{0}'")]
    UnknownExtension(String),

    /// `check` found extensions that need a reload.
    #[error("{count} extension(s) require a reload")]
    ReloadRequired {
        /// Number of affected records.
        count: usize,
    },

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
