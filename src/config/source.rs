//! Where snapshots come from.
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::Snapshot;
use super::toml_loader::load_toml;
use crate::error::SnapshotError;

/// A source of inventory snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotSource {
    /// Load the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    fn load(&self) -> Result<Snapshot, SnapshotError>;

    /// Opaque revision marker; a change means the snapshot should be reloaded.
    ///
    /// `None` when the source cannot tell.
    fn revision(&self) -> Option<SystemTime>;
}

/// Snapshot stored in a TOML file; its modification time is the revision.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn load(&self) -> Result<Snapshot, SnapshotError> {
        load_toml(&self.path)
    }

    fn revision(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}
