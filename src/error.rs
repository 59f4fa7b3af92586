//! Domain-specific error types for the reconciliation engine.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`DirectiveError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError     — TOML loading and directive-block validation
//! DirectiveError  — unknown directive names, rejected identifiers
//! ExecError       — external process supervision (timeouts)
//! ```
//!
//! None of these cross a directive batch: install, tap and bundle failures
//! collapse into a `bool` plus logged detail.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that arise from loading the directive file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected layout.
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying deserialization error.
        source: toml::de::Error,
    },

    /// A `[settings]` value is unusable.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Name of the offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `[[directives]]` entry holds no directive key.
    #[error("Directive block #{index} is empty")]
    EmptyDirective {
        /// One-based position of the block in the file.
        index: usize,
    },

    /// A `[[directives]]` entry holds more than one directive key.
    #[error("Directive block #{index} holds several directives ({keys}); split it into one block each")]
    MultipleDirectives {
        /// One-based position of the block in the file.
        index: usize,
        /// Comma-separated list of the keys found.
        keys: String,
    },

    /// A `[[directives]]` entry names a directive nobody handles.
    #[error("Directive block #{index}: {source}")]
    UnknownDirective {
        /// One-based position of the block in the file.
        index: usize,
        /// The underlying lookup failure.
        source: DirectiveError,
    },
}

/// Errors that arise at the directive dispatch boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// The directive name is not one of `tap`, `brew`, `cask`, `brewfile`.
    #[error("Brew cannot handle directive '{0}'")]
    Unknown(String),

    /// A package, tap or bundle path was rejected before reaching a command line.
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors raised while supervising an external process.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process ran longer than the configured timeout and was killed.
    #[error("'{command}' timed out after {}s", after.as_secs())]
    TimedOut {
        /// Rendered command line.
        command: String,
        /// The timeout that expired.
        after: Duration,
    },
}
