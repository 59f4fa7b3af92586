//! Core logging types: directive entries, status, and the [`Log`] trait.

/// Directive execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct DirectiveEntry {
    /// Directive label (e.g. `brew (3 items)`).
    pub name: String,
    /// Final status of the directive.
    pub status: DirectiveStatus,
    /// Optional detail message (e.g., failure description).
    pub message: Option<String>,
}

/// Status of a completed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveStatus {
    /// Every item in the directive is in place.
    Ok,
    /// The directive does not apply to this host (casks off macOS).
    NotApplicable,
    /// At least one item failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to [`tracing`]; tests plug in
/// a recording sink so message text can be asserted.
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
    /// Record a directive result for the summary.
    fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>);
}
