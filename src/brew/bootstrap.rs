//! Best-effort installation and update of the manager itself.
//!
//! Both steps swallow every failure: an already working manager is the
//! common case, and a failed `update` must not block package installs.
//! Each step runs at most once per [`BootstrapManager`]; the manager is
//! created once per run and handed to every directive.
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Settings;
use crate::exec::{CommandSpec, Executor, OutputMode};
use crate::logging::Log;

use super::commands;

/// Ensures the manager runtime and its cask tap are in place.
pub struct BootstrapManager<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    settings: &'a Settings,
    runtime_ready: AtomicBool,
    cask_ready: AtomicBool,
}

impl std::fmt::Debug for BootstrapManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapManager")
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .field("settings", &self.settings)
            .field("runtime_ready", &self.runtime_ready)
            .field("cask_ready", &self.cask_ready)
            .finish()
    }
}

impl<'a> BootstrapManager<'a> {
    /// Create a bootstrap manager with neither step run yet.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, log: &'a dyn Log, settings: &'a Settings) -> Self {
        Self {
            executor,
            log,
            settings,
            runtime_ready: AtomicBool::new(false),
            cask_ready: AtomicBool::new(false),
        }
    }

    /// Install the manager if it is not on `PATH`, then update it.
    pub fn ensure_runtime(&self) {
        if !self.settings.bootstrap || self.runtime_ready.swap(true, Ordering::SeqCst) {
            return;
        }

        let manager = self.settings.manager.as_str();
        if self.executor.which(manager) {
            self.log.debug(&format!("{manager} found on PATH"));
        } else {
            self.log.info(&format!("{manager} not found, running install script"));
            self.best_effort(&commands::install_script(&self.settings.install_script_url));
        }
        self.best_effort(&commands::update(manager));
    }

    /// Bootstrap the runtime, then tap the cask repository.
    pub fn ensure_cask_extension(&self) {
        self.ensure_runtime();
        if !self.settings.bootstrap || self.cask_ready.swap(true, Ordering::SeqCst) {
            return;
        }
        self.best_effort(&commands::tap(&self.settings.manager, &self.settings.cask_tap, None));
    }

    fn best_effort(&self, cmd: &CommandSpec) {
        match self.executor.run(cmd, OutputMode::Discard) {
            Ok(result) if result.success => self.log.debug(&format!("bootstrap: {cmd} ok")),
            Ok(result) => self.log.debug(&format!(
                "bootstrap: {cmd} exited {} (ignored)",
                result.exit_code()
            )),
            Err(e) => self.log.debug(&format!("bootstrap: {e:#} (ignored)")),
        }
    }
}
