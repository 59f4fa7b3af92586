//! The `[settings]` table.
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::brew::BenignMarkers;
use crate::brew::commands::{DEFAULT_CASK_TAP, DEFAULT_INSTALL_SCRIPT_URL, DEFAULT_MANAGER};
use crate::error::ConfigError;

/// Engine settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Manager executable (name on `PATH` or absolute path).
    pub manager: String,
    /// Install script fetched when the manager is missing.
    pub install_script_url: String,
    /// Repository tapped to enable casks.
    pub cask_tap: String,
    /// Kill external commands after this many seconds. Unset or `0` waits forever.
    pub timeout_secs: Option<u64>,
    /// Markers appended to the built-in benign-output table.
    pub benign_markers: Vec<String>,
    /// Run the bootstrap steps before directives.
    pub bootstrap: bool,
    /// Working directory, relative to the config file.
    pub directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manager: DEFAULT_MANAGER.to_string(),
            install_script_url: DEFAULT_INSTALL_SCRIPT_URL.to_string(),
            cask_tap: DEFAULT_CASK_TAP.to_string(),
            timeout_secs: None,
            benign_markers: Vec::new(),
            bootstrap: true,
            directory: None,
        }
    }
}

impl Settings {
    /// Command timeout, `None` for unbounded.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    /// Built-in benign markers plus the configured extras.
    #[must_use]
    pub fn markers(&self) -> BenignMarkers {
        BenignMarkers::default().with_extra(&self.benign_markers)
    }

    /// Reject values that would end up unsafely on a command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, reason: &str| ConfigError::InvalidSetting {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if self.manager.trim().is_empty() || self.manager.chars().any(char::is_whitespace) {
            return Err(invalid("manager", "must be a single executable name or path"));
        }
        if !self.install_script_url.starts_with("https://") {
            return Err(invalid("install_script_url", "must be an https:// URL"));
        }
        if self
            .install_script_url
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || "\"'`$\\;|&<>()".contains(c))
        {
            return Err(invalid(
                "install_script_url",
                "must not contain quotes, whitespace or shell metacharacters",
            ));
        }
        crate::brew::commands::validate_name(&self.cask_tap)
            .map_err(|e| invalid("cask_tap", &e.to_string()))?;
        Ok(())
    }
}
