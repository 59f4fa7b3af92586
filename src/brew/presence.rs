//! Installed-state queries.
//!
//! Cask state is exposed inconsistently across manager versions, so the
//! cask check is an OR of two heuristics. A wrong "absent" answer only
//! costs a redundant install attempt, which the classifier then treats as
//! a benign duplicate.
use crate::exec::{CommandSpec, Executor, OutputMode};

use super::commands;
use super::{PackageKind, PackageRequest};

/// Text `info --cask` prints for a cask that is not installed.
const NOT_INSTALLED_MARKER: &str = "Not installed";

/// Asks the manager whether a package is installed.
pub struct PresenceChecker<'a> {
    executor: &'a dyn Executor,
    manager: &'a str,
}

impl std::fmt::Debug for PresenceChecker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceChecker")
            .field("executor", &"<dyn Executor>")
            .field("manager", &self.manager)
            .finish()
    }
}

impl<'a> PresenceChecker<'a> {
    /// Create a presence checker for the given manager executable.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, manager: &'a str) -> Self {
        Self { executor, manager }
    }

    /// Whether `request` is already installed.
    ///
    /// Never fails: a query that cannot be run counts as "not installed".
    #[must_use]
    pub fn is_installed(&self, request: &PackageRequest) -> bool {
        match request.kind {
            PackageKind::Formula => {
                self.exits_zero(&commands::formula_versions(self.manager, &request.id))
            }
            PackageKind::Cask => {
                self.exits_zero(&commands::cask_list(self.manager, &request.id))
                    || self.info_reports_installed(&request.id)
            }
        }
    }

    fn exits_zero(&self, cmd: &CommandSpec) -> bool {
        self.executor
            .run(cmd, OutputMode::Discard)
            .is_ok_and(|r| r.success)
    }

    fn info_reports_installed(&self, id: &str) -> bool {
        self.executor
            .run(&commands::cask_info(self.manager, id), OutputMode::Capture)
            .is_ok_and(|r| r.success && !r.combined_output().contains(NOT_INSTALLED_MARKER))
    }
}
