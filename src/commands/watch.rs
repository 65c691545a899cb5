//! Watch command: re-resolve whenever the snapshot changes.
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, WatchOpts};
use crate::config::{FileSource, Snapshot, SnapshotSource};
use crate::error::SnapshotError;
use crate::host::ExtensionHost;
use crate::logging::{Log, Logger};
use crate::model::ExtensionRef;
use crate::placement::resolve_all;
use crate::status::{DecisionChange, DecisionKey, DecisionTracker, ExtensionSnapshot, StatusLabel};

/// What changed since the previous poll.
#[derive(Debug, Default)]
pub struct WatchUpdate {
    /// Decisions that were added, changed or removed.
    pub changes: Vec<DecisionChange>,
    /// Transitions that took effect without a reload.
    pub labels: Vec<(String, StatusLabel)>,
    /// Records now resolved.
    pub total: usize,
}

/// Polls a snapshot source and reports only what changed.
#[derive(Debug)]
pub struct Watcher<S> {
    source: S,
    parallel: bool,
    /// Revision seen at the last poll; outer `None` before the first poll.
    last_revision: Option<Option<SystemTime>>,
    tracker: DecisionTracker,
    lifecycle: HashMap<DecisionKey, ExtensionSnapshot>,
}

impl<S: SnapshotSource> Watcher<S> {
    /// Watch `source`.
    pub fn new(source: S, parallel: bool) -> Self {
        Self {
            source,
            parallel,
            last_revision: None,
            tracker: DecisionTracker::new(),
            lifecycle: HashMap::new(),
        }
    }

    /// Reload and re-resolve if the revision moved since the last poll.
    ///
    /// Any number of writes between two polls collapse into one reload of
    /// the latest contents. Returns `Ok(None)` when nothing was reloaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the source changed but cannot be loaded. The
    /// revision is not recorded then, so the next poll retries the load.
    pub fn poll(&mut self) -> Result<Option<WatchUpdate>, SnapshotError> {
        let revision = self.source.revision();
        if self.last_revision == Some(revision) {
            return Ok(None);
        }
        let snapshot = self.source.load()?;
        self.last_revision = Some(revision);
        Ok(Some(self.apply(&snapshot)))
    }

    fn apply(&mut self, snapshot: &Snapshot) -> WatchUpdate {
        let resolutions = resolve_all(&snapshot.inputs(), &snapshot.host, self.parallel);
        let changes = self.tracker.update(&resolutions);

        let mut labels = Vec::new();
        let mut lifecycle = HashMap::with_capacity(snapshot.installed.len());
        for ext in &snapshot.installed {
            let key = (ext.identifier.key(), ext.server);
            let current = match self.lifecycle.get(&key) {
                Some(previous) => {
                    let current = previous.next(ext);
                    let (can_add, can_remove) = hot_capabilities(ext, snapshot);
                    if let Some(label) =
                        StatusLabel::transition(previous, &current, can_add, can_remove)
                    {
                        labels.push((super::record_name(ext), label));
                    }
                    current
                }
                None => ExtensionSnapshot::first(ext),
            };
            lifecycle.insert(key, current);
        }
        self.lifecycle = lifecycle;

        WatchUpdate {
            changes,
            labels,
            total: resolutions.len(),
        }
    }
}

/// Whether a transition of `ext` can take effect without a reload.
///
/// A running copy of the same build is already added; a record with nothing
/// running on its server has nothing to remove.
fn hot_capabilities(ext: &ExtensionRef, snapshot: &Snapshot) -> (bool, bool) {
    let mut on_server = snapshot
        .running
        .iter()
        .filter(|r| r.identifier.matches(&ext.identifier) && Some(r.server) == ext.server);
    let same_build = on_server.clone().any(|r| r.is_same_build(ext));
    let any_running = on_server.next().is_some();
    (
        same_build || snapshot.host.can_add_extension(ext),
        !any_running || snapshot.host.can_remove_extension(ext),
    )
}

/// Log one update in human-readable form.
pub fn report(update: &WatchUpdate, log: &dyn Log) {
    for change in &update.changes {
        let (id, server) = change.key();
        let name = server.map_or_else(|| id.clone(), |s| format!("{id}@{s}"));
        match change {
            DecisionChange::Added { decision, .. } => {
                log.debug(&format!("{name}: {}", decision.reason.name()));
            }
            DecisionChange::Changed { before, after, .. } => {
                let line = format!(
                    "{name}: {} -> {} ({})",
                    before.reason.name(),
                    after.reason.name(),
                    after.message()
                );
                if after.reload_required {
                    log.warn(&line);
                } else {
                    log.info(&line);
                }
            }
            DecisionChange::Removed { .. } => log.info(&format!("{name}: removed")),
        }
    }
    for (name, label) in &update.labels {
        log.info(&format!("{name}: {label}"));
    }
}

/// Run the watch command until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the Ctrl-C handler cannot be installed.
pub fn run(global: &GlobalOpts, opts: &WatchOpts, log: &Logger) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .context("installing Ctrl-C handler")?;

    let source = FileSource::new(&global.snapshot);
    log.stage(&format!(
        "Watching {} every {}ms",
        source.path().display(),
        opts.interval_ms
    ));
    let mut watcher = Watcher::new(source, global.parallel);
    let interval = Duration::from_millis(opts.interval_ms);

    while !stop.load(Ordering::SeqCst) {
        match watcher.poll() {
            Ok(Some(update)) => {
                report(&update, log);
                log.debug(&format!(
                    "{} records, {} change(s)",
                    update.total,
                    update.changes.len()
                ));
            }
            Ok(None) => {}
            Err(e) => log.warn(&format!("{e}")),
        }
        std::thread::sleep(interval);
    }

    log.info("stopped");
    Ok(())
}
