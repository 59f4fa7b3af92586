//! Structured logger with summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{DirectiveEntry, DirectiveStatus, Log};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger that forwards every message to [`tracing`] and keeps
/// the directive results for the closing summary.
#[derive(Debug, Default)]
pub struct Logger {
    directives: Mutex<Vec<DirectiveEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember where the file layer writes, for display in the summary.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
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
        tracing::info!(target: "brew_reconcile::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a directive result for the summary.
    pub fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.directives.lock() {
            guard.push(DirectiveEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// All recorded directive entries, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<DirectiveEntry> {
        self.directives
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    /// Count the number of failed directives.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.directives.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|d| d.status == DirectiveStatus::Failed)
                .count()
        })
    }

    /// Log the summary of all recorded directives.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut not_applicable = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                DirectiveStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                DirectiveStatus::NotApplicable => {
                    not_applicable += 1;
                    ("·", "\x1b[2m")
                }
                DirectiveStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + not_applicable + failed;
        self.info(&format!(
            "{total} directives: \x1b[32m{ok} ok\x1b[0m, \x1b[2m{not_applicable} n/a\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>) {
        self.record_directive(name, status, message);
    }
}
