//! Shared state handed to every directive.
use std::sync::Arc;

use crate::brew::BenignMarkers;
use crate::config::Settings;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Shared state for one run of directives.
pub struct Context {
    /// Effective settings (file values with CLI overrides applied).
    pub settings: Settings,
    /// Host platform, used for the cask gate.
    pub platform: Platform,
    /// Logger for output and directive recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    markers: BenignMarkers,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("markers", &self.markers)
            .finish()
    }
}

impl Context {
    /// Creates a new context. The benign-marker table is built once here
    /// from `settings`.
    #[must_use]
    pub fn new(
        settings: Settings,
        platform: Platform,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        let markers = settings.markers();
        Self {
            settings,
            platform,
            log,
            executor,
            markers,
        }
    }

    /// Benign install-output markers in effect for this run.
    #[must_use]
    pub const fn markers(&self) -> &BenignMarkers {
        &self.markers
    }

    /// The configured manager executable.
    #[must_use]
    pub fn manager(&self) -> &str {
        &self.settings.manager
    }
}
