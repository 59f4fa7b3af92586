//! Check-then-install reconciliation of formula and cask lists.
//!
//! Each request moves through three steps: a presence check, an install
//! attempt when the package is absent, and classification of that attempt.
//! A failed package never stops the batch; its siblings are still
//! processed and the failure only shows up in [`RunResult`].
use crate::exec::{Executor, OutputMode};
use crate::logging::Log;

use super::classify::{BenignMarkers, classify};
use super::commands;
use super::presence::PresenceChecker;
use super::{InstallOutcome, PackageRequest, RunResult};

/// Ensures every requested package is installed.
pub struct InstallReconciler<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    manager: &'a str,
    markers: &'a BenignMarkers,
}

impl std::fmt::Debug for InstallReconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallReconciler")
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .field("manager", &self.manager)
            .field("markers", &self.markers)
            .finish()
    }
}

impl<'a> InstallReconciler<'a> {
    /// Create a reconciler from its collaborators.
    #[must_use]
    pub const fn new(
        executor: &'a dyn Executor,
        log: &'a dyn Log,
        manager: &'a str,
        markers: &'a BenignMarkers,
    ) -> Self {
        Self {
            executor,
            log,
            manager,
            markers,
        }
    }

    /// Reconcile `requests` in order, continuing past failures.
    #[must_use]
    pub fn reconcile(&self, requests: &[PackageRequest]) -> RunResult {
        RunResult {
            outcomes: requests
                .iter()
                .map(|request| (request.clone(), self.reconcile_one(request)))
                .collect(),
        }
    }

    /// Reconcile a single request.
    #[must_use]
    pub fn reconcile_one(&self, request: &PackageRequest) -> InstallOutcome {
        let id = request.id.as_str();

        if let Err(e) = commands::validate_name(id) {
            self.log.warn(&format!("Failed to install [{id}]: {e}"));
            return InstallOutcome::Failed;
        }

        if PresenceChecker::new(self.executor, self.manager).is_installed(request) {
            self.log.info(&format!("{id} is already installed"));
            return InstallOutcome::AlreadyPresent;
        }

        self.log.info(&format!("Installing {id}"));
        let cmd = commands::install(self.manager, request);
        let outcome = match self.executor.run(&cmd, OutputMode::Capture) {
            Ok(result) => {
                let output = result.combined_output();
                let outcome = classify(result.exit_code(), &output, self.markers);
                if outcome == InstallOutcome::Failed {
                    self.log.debug(&format!(
                        "{cmd} exited {}: {}",
                        result.exit_code(),
                        output.trim()
                    ));
                }
                outcome
            }
            Err(e) => {
                self.log.debug(&format!("{e:#}"));
                InstallOutcome::Failed
            }
        };

        match outcome {
            InstallOutcome::BenignDuplicate => self
                .log
                .info(&format!("{id} appears to be already installed, continuing...")),
            InstallOutcome::Failed => self.log.warn(&format!("Failed to install [{id}]")),
            InstallOutcome::Installed | InstallOutcome::AlreadyPresent => {}
        }
        outcome
    }
}
