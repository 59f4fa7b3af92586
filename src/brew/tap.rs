//! Repository registration.
//!
//! Taps are processed in order and the batch stops at the first failure:
//! later taps may rely on formulae the failed one would have provided.
//! Taps registered before the failure stay registered.
use crate::exec::{Executor, OutputMode};
use crate::logging::Log;

use super::commands;

/// Outcome of a fail-fast tap batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapBatchResult {
    /// Taps registered successfully, in order.
    pub tapped: Vec<String>,
    /// The tap that stopped the batch, if any.
    pub failed: Option<String>,
}

impl TapBatchResult {
    /// Whether every tap in the batch was registered.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failed.is_none()
    }
}

/// Registers additional repositories with the manager.
pub struct TapManager<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    manager: &'a str,
}

impl std::fmt::Debug for TapManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapManager")
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl<'a> TapManager<'a> {
    /// Create a tap manager for the given manager executable.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, log: &'a dyn Log, manager: &'a str) -> Self {
        Self {
            executor,
            log,
            manager,
        }
    }

    /// Tap each name in order, stopping at the first failure.
    #[must_use]
    pub fn tap_all(&self, names: &[String]) -> TapBatchResult {
        let mut batch = TapBatchResult::default();
        for name in names {
            if !self.tap(name) {
                self.log.warn(&format!("Failed to tap [{name}]"));
                batch.failed = Some(name.clone());
                return batch;
            }
            batch.tapped.push(name.clone());
        }
        batch
    }

    fn tap(&self, entry: &str) -> bool {
        let (name, remote) = match commands::parse_tap(entry) {
            Ok(parts) => parts,
            Err(e) => {
                self.log.debug(&e.to_string());
                return false;
            }
        };
        self.log.info(&format!("Tapping {name}"));
        match self
            .executor
            .run(&commands::tap(self.manager, name, remote), OutputMode::Discard)
        {
            Ok(result) => result.success,
            Err(e) => {
                self.log.debug(&format!("{e:#}"));
                false
            }
        }
    }
}
