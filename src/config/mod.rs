//! Directive file loading.
//!
//! A directive file is TOML with an optional `[settings]` table and an
//! ordered `[[directives]]` array. Each array entry holds exactly one key,
//! the directive name, mapped to its list of items:
//!
//! ```toml
//! [settings]
//! timeout_secs = 900
//!
//! [[directives]]
//! tap = ["homebrew/cask-fonts"]
//!
//! [[directives]]
//! brew = ["git", "ripgrep"]
//! ```
pub mod settings;
pub mod toml_loader;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::directive::Directive;
use crate::error::ConfigError;

pub use settings::Settings;

/// One `[[directives]]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    /// Which directive the block names.
    pub directive: Directive,
    /// Items handed to the directive, in file order.
    pub items: Vec<String>,
}

/// A loaded directive file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Validated `[settings]` table.
    pub settings: Settings,
    /// Directive blocks, in file order.
    pub directives: Vec<DirectiveBlock>,
    /// Directory containing the file.
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    directives: Vec<BTreeMap<String, Vec<String>>>,
}

impl Config {
    /// Load and validate the directive file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, a
    /// setting is invalid, or a directive block is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml_loader::load_config(path)?;
        Self::from_raw(raw, base_dir(path))
    }

    /// Parse directive-file text as if it were loaded from `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus I/O failures.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml_loader::parse_config(content, path)?;
        Self::from_raw(raw, base_dir(path))
    }

    fn from_raw(raw: RawConfig, base_dir: PathBuf) -> Result<Self, ConfigError> {
        raw.settings.validate()?;
        let directives = raw
            .directives
            .into_iter()
            .enumerate()
            .map(|(i, block)| directive_block(i + 1, block))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            settings: raw.settings,
            directives,
            base_dir,
        })
    }

    /// Directory external commands run in: `settings.directory` resolved
    /// against the file's directory, or the file's directory itself.
    #[must_use]
    pub fn working_dir(&self) -> PathBuf {
        self.settings
            .directory
            .as_ref()
            .map_or_else(|| self.base_dir.clone(), |dir| self.base_dir.join(dir))
    }
}

/// Directory holding `path`, or `.` for a bare file name.
fn base_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn directive_block(
    index: usize,
    block: BTreeMap<String, Vec<String>>,
) -> Result<DirectiveBlock, ConfigError> {
    if block.len() > 1 {
        return Err(ConfigError::MultipleDirectives {
            index,
            keys: block.keys().cloned().collect::<Vec<_>>().join(", "),
        });
    }
    let Some((name, items)) = block.into_iter().next() else {
        return Err(ConfigError::EmptyDirective { index });
    };
    let directive = name
        .parse::<Directive>()
        .map_err(|source| ConfigError::UnknownDirective { index, source })?;
    Ok(DirectiveBlock { directive, items })
}
