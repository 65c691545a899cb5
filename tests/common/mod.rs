// Shared helpers for integration tests.
//
// Provides a fluent builder that writes an inventory snapshot into a
// temporary directory, so each test can describe its scenario without
// repeating TOML boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use extension_placement::commands::record_name;
use extension_placement::config::Snapshot;
use extension_placement::placement::Resolution;

/// A snapshot file backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when dropped.
pub struct TestSnapshot {
    /// Temporary directory holding `snapshot.toml`.
    pub dir: tempfile::TempDir,
    /// Path to the snapshot file.
    pub path: PathBuf,
}

impl TestSnapshot {
    /// Path to the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the snapshot file.
    pub fn load(&self) -> Snapshot {
        Snapshot::load(&self.path).expect("load snapshot")
    }
}

/// One `[[installed]]` record.
struct Installed {
    id: String,
    version: String,
    server: String,
    record: Vec<String>,
    manifest: Vec<String>,
}

/// Fluent builder for [`TestSnapshot`].
pub struct SnapshotBuilder {
    sections: Vec<String>,
    installed: Vec<Installed>,
    running: Vec<String>,
}

impl SnapshotBuilder {
    /// Begin a snapshot with only a local server.
    pub fn new() -> Self {
        Self {
            sections: vec!["[servers]\nlocal = true\n".to_string()],
            installed: Vec::new(),
            running: Vec::new(),
        }
    }

    /// Replace the `[servers]` section.
    pub fn servers(mut self, local: bool, remote: bool, web: bool) -> Self {
        self.sections[0] = format!("[servers]\nlocal = {local}\nremote = {remote}\nweb = {web}\n");
        self
    }

    /// Add a `[workspace]` section.
    pub fn workspace(mut self, trust_enabled: bool, trusted: bool, is_virtual: bool) -> Self {
        self.sections.push(format!(
            "[workspace]\ntrust_enabled = {trust_enabled}\ntrusted = {trusted}\nvirtual = {is_virtual}\n"
        ));
        self
    }

    /// Add a `[host]` section.
    pub fn host(mut self, hot_add: bool, hot_remove: bool) -> Self {
        self.sections.push(format!(
            "[host]\nhot_add = {hot_add}\nhot_remove = {hot_remove}\n"
        ));
        self
    }

    /// Add an installed record with the given execution kinds.
    pub fn installed(mut self, id: &str, version: &str, server: &str, kinds: &[&str]) -> Self {
        let kinds = kinds
            .iter()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.installed.push(Installed {
            id: id.to_string(),
            version: version.to_string(),
            server: server.to_string(),
            record: Vec::new(),
            manifest: vec![format!("extension_kind = [{kinds}]")],
        });
        self
    }

    /// Append a raw `key = value` line to the last installed record.
    pub fn with(mut self, line: &str) -> Self {
        if let Some(last) = self.installed.last_mut() {
            last.record.push(line.to_string());
        }
        self
    }

    /// Append a raw `key = value` line to the last installed record's manifest.
    pub fn with_manifest(mut self, line: &str) -> Self {
        if let Some(last) = self.installed.last_mut() {
            last.manifest.push(line.to_string());
        }
        self
    }

    /// Add a running extension.
    pub fn running(mut self, id: &str, version: &str, server: &str) -> Self {
        self.running.push(format!(
            "[[running]]\nid = \"{id}\"\nversion = \"{version}\"\nserver = \"{server}\"\n"
        ));
        self
    }

    /// Render the snapshot as TOML.
    pub fn to_toml(&self) -> String {
        let mut out = self.sections.join("\n");
        for ext in &self.installed {
            let _ = write!(
                out,
                "\n[[installed]]\nid = \"{}\"\nversion = \"{}\"\nserver = \"{}\"\n",
                ext.id, ext.version, ext.server
            );
            for line in &ext.record {
                let _ = writeln!(out, "{line}");
            }
            out.push_str("[installed.manifest]\n");
            for line in &ext.manifest {
                let _ = writeln!(out, "{line}");
            }
        }
        for running in &self.running {
            out.push('\n');
            out.push_str(running);
        }
        out
    }

    /// Write the snapshot to a fresh temporary directory.
    pub fn build(self) -> TestSnapshot {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("snapshot.toml");
        std::fs::write(&path, self.to_toml()).expect("write snapshot");
        TestSnapshot { dir, path }
    }
}

/// One line per resolution: name, flags, and reason code.
pub fn table(resolutions: &[Resolution<'_>]) -> String {
    resolutions
        .iter()
        .map(|r| {
            format!(
                "{} enabled={} reload={} {}",
                record_name(r.extension),
                r.decision.enabled,
                r.decision.reload_required,
                r.decision.reason.name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
