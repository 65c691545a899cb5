//! Extension identity and matching.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an extension: `publisher.name` plus an optional gallery UUID.
///
/// # Examples
///
/// ```
/// use extension_placement::model::ExtensionIdentifier;
///
/// let a = ExtensionIdentifier::new("MS-Python.Python");
/// let b = ExtensionIdentifier::new("ms-python.python");
/// assert!(a.matches(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionIdentifier {
    /// Extension identifier in `publisher.name` format.
    pub id: String,
    /// Gallery UUID, when the extension came from a marketplace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ExtensionIdentifier {
    /// Create an identifier without a UUID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uuid: None,
        }
    }

    /// Attach a gallery UUID.
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Whether both identifiers denote the same logical extension.
    ///
    /// UUIDs win when both sides carry one; otherwise ids are compared
    /// ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (&self.uuid, &other.uuid) {
            (Some(a), Some(b)) => a == b,
            _ => self.id.eq_ignore_ascii_case(&other.id),
        }
    }

    /// Lower-cased id, used as a map key.
    #[must_use]
    pub fn key(&self) -> String {
        self.id.to_ascii_lowercase()
    }
}

impl fmt::Display for ExtensionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_case_insensitively() {
        let a = ExtensionIdentifier::new("GitHub.Copilot");
        let b = ExtensionIdentifier::new("github.copilot");
        assert!(a.matches(&b));
        assert!(b.matches(&a));
    }

    #[test]
    fn uuids_take_precedence_over_ids() {
        let a = ExtensionIdentifier::new("github.copilot").with_uuid("1");
        let b = ExtensionIdentifier::new("github.copilot").with_uuid("2");
        assert!(!a.matches(&b), "different uuids must not match");

        let renamed = ExtensionIdentifier::new("github.copilot-renamed").with_uuid("1");
        assert!(a.matches(&renamed), "same uuid should match across renames");
    }

    #[test]
    fn single_uuid_falls_back_to_id() {
        let a = ExtensionIdentifier::new("github.copilot").with_uuid("1");
        let b = ExtensionIdentifier::new("GITHUB.COPILOT");
        assert!(a.matches(&b));
    }

    #[test]
    fn different_ids_do_not_match() {
        let a = ExtensionIdentifier::new("github.copilot");
        let b = ExtensionIdentifier::new("github.copilot-chat");
        assert!(!a.matches(&b));
    }

    #[test]
    fn key_is_lowercase() {
        assert_eq!(
            ExtensionIdentifier::new("Rust-Lang.Rust-Analyzer").key(),
            "rust-lang.rust-analyzer"
        );
    }
}
