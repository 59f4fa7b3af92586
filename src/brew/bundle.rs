//! Brewfile installation.
//!
//! Per-package handling inside a Brewfile is left to `brew bundle`; there
//! is no presence check here. Files are applied in order and the first
//! failing file stops the batch.
use crate::exec::{Executor, OutputMode};
use crate::logging::Log;

use super::commands;

/// Applies Brewfiles with the manager's bundle command.
pub struct BundleInstaller<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    manager: &'a str,
}

impl std::fmt::Debug for BundleInstaller<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleInstaller")
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl<'a> BundleInstaller<'a> {
    /// Create a Brewfile installer for the given manager executable.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, log: &'a dyn Log, manager: &'a str) -> Self {
        Self {
            executor,
            log,
            manager,
        }
    }

    /// Install every Brewfile in `paths`; `false` at the first failure.
    ///
    /// Relative paths resolve against the executor's working directory.
    #[must_use]
    pub fn install_files(&self, paths: &[String]) -> bool {
        for path in paths {
            if !self.install_file(path) {
                self.log.warn(&format!("Failed to install file [{path}]"));
                return false;
            }
        }
        true
    }

    fn install_file(&self, path: &str) -> bool {
        if let Err(e) = commands::validate_path(path) {
            self.log.debug(&e.to_string());
            return false;
        }
        self.log.info(&format!("Installing from file {path}"));
        match self
            .executor
            .run(&commands::bundle(self.manager, path), OutputMode::Discard)
        {
            Ok(result) => result.success,
            Err(e) => {
                self.log.debug(&format!("{e:#}"));
                false
            }
        }
    }
}
