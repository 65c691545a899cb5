//! Core logging types: result entries, outcomes, and the [`Log`] trait.

/// Resolution result for summary reporting.
#[derive(Debug, Clone)]
pub struct ResultEntry {
    /// Extension id and server, e.g. `ms-python.python@remote`.
    pub name: String,
    /// Summary bucket of the decision.
    pub outcome: Outcome,
    /// Optional detail message (usually the decision message).
    pub message: Option<String>,
}

/// Summary bucket of one placement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enabled and reconciled.
    Ok,
    /// Disabled with nothing to reconcile.
    Disabled,
    /// Needs user action other than a reload (install elsewhere, trust, ...).
    Attention,
    /// Needs a window reload.
    Reload,
}

/// Abstraction over logging backends.
///
/// Command code logs through this trait so tests can substitute a logger
/// writing to an isolated subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a resolution result for the summary.
    fn record(&self, name: &str, outcome: Outcome, message: Option<&str>);
}
