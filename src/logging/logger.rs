//! Structured logger with result collection for the run summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{Log, Outcome, ResultEntry};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger that also collects per-extension results.
///
/// Every message also lands in `$XDG_CACHE_HOME/placement/<command>.log`
/// through the file layer installed by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    results: Mutex<Vec<ResultEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded results (test-only).
    #[cfg(test)]
    pub(crate) fn entries(&self) -> Vec<ResultEntry> {
        self.results.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only with `-v`; always in the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a resolution result for the summary.
    pub fn record(&self, name: &str, outcome: Outcome, message: Option<&str>) {
        if let Ok(mut guard) = self.results.lock() {
            guard.push(ResultEntry {
                name: name.to_string(),
                outcome,
                message: message.map(String::from),
            });
        }
    }

    /// Print every recorded result followed by per-outcome totals.
    pub fn print_summary(&self) {
        let results = match self.results.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if results.is_empty() {
            return;
        }

        self.stage("Summary");

        let (mut ok, mut disabled, mut attention, mut reload) = (0usize, 0usize, 0usize, 0usize);
        for entry in &results {
            let (icon, color) = match entry.outcome {
                Outcome::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                Outcome::Disabled => {
                    disabled += 1;
                    ("·", "\x1b[2m")
                }
                Outcome::Attention => {
                    attention += 1;
                    ("!", "\x1b[33m")
                }
                Outcome::Reload => {
                    reload += 1;
                    ("↻", "\x1b[36m")
                }
            };
            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        self.info(&format!(
            "{} extensions: \x1b[32m{ok} ok\x1b[0m, \x1b[2m{disabled} disabled\x1b[0m, \x1b[33m{attention} attention\x1b[0m, \x1b[36m{reload} reload\x1b[0m",
            results.len()
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record(&self, name: &str, outcome: Outcome, message: Option<&str>) {
        self.record(name, outcome, message);
    }
}
