//! TOML snapshot file parsing.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SnapshotError;

/// Read and deserialize a TOML file.
///
/// Unlike optional config files, a snapshot must exist: a missing file is
/// reported as [`SnapshotError::NotFound`] rather than an empty value.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or does not match `T`.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SnapshotError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_toml(path, &content)
}

/// Deserialize TOML `content`, attributing errors to `path`.
///
/// # Errors
///
/// Returns [`SnapshotError::Parse`] if `content` does not match `T`.
pub fn parse_toml<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, SnapshotError> {
    toml::from_str(content).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
