//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{DirectiveEntry, DirectiveStatus, Log};

/// Shared log sinks for unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::{DirectiveStatus, Log};

    /// A [`Log`] that keeps every message as `"<level>: <text>"`.
    #[derive(Debug, Default)]
    pub struct RecordingLog {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingLog {
        /// An empty log.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All messages so far, in order.
        #[must_use]
        pub fn lines(&self) -> Vec<String> {
            self.lines
                .lock()
                .map_or_else(|_| Vec::new(), |guard| guard.clone())
        }

        /// Whether a message equal to `"<level>: <text>"` was logged.
        #[must_use]
        pub fn contains(&self, line: &str) -> bool {
            self.lines().iter().any(|l| l == line)
        }

        fn push(&self, level: &str, msg: &str) {
            if let Ok(mut guard) = self.lines.lock() {
                guard.push(format!("{level}: {msg}"));
            }
        }
    }

    impl Log for RecordingLog {
        fn stage(&self, msg: &str) {
            self.push("stage", msg);
        }

        fn info(&self, msg: &str) {
            self.push("info", msg);
        }

        fn debug(&self, msg: &str) {
            self.push("debug", msg);
        }

        fn warn(&self, msg: &str) {
            self.push("warn", msg);
        }

        fn error(&self, msg: &str) {
            self.push("error", msg);
        }

        fn record_directive(&self, name: &str, status: DirectiveStatus, _: Option<&str>) {
            self.push("record", &format!("{name} {status:?}"));
        }
    }
}
