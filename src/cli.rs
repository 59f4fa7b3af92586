//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::directive::Directive;

/// Top-level CLI entry point for the Homebrew reconciliation engine.
#[derive(Parser, Debug)]
#[command(
    name = "brew-reconcile",
    about = "Declarative Homebrew formula, cask, tap and bundle reconciliation",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Run external commands in this directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Kill any external command running longer than this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip installing and updating Homebrew and tapping the cask repository
    #[arg(long = "no-bootstrap", global = true, action = clap::ArgAction::SetFalse)]
    pub bootstrap: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply every directive in a directive file
    Apply(ApplyOpts),
    /// Register package repositories
    Tap(ItemsOpts),
    /// Install formulae
    Brew(ItemsOpts),
    /// Install casks (macOS only)
    Cask(ItemsOpts),
    /// Install from Brewfiles
    Brewfile(ItemsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used for the log file name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Apply(_) => "apply",
            Self::Tap(_) => "tap",
            Self::Brew(_) => "brew",
            Self::Cask(_) => "cask",
            Self::Brewfile(_) => "brewfile",
            Self::Version => "version",
        }
    }

    /// The directive an ad-hoc subcommand runs, with its items.
    #[must_use]
    pub fn directive(&self) -> Option<(Directive, &[String])> {
        match self {
            Self::Tap(opts) => Some((Directive::Tap, &opts.items)),
            Self::Brew(opts) => Some((Directive::Brew, &opts.items)),
            Self::Cask(opts) => Some((Directive::Cask, &opts.items)),
            Self::Brewfile(opts) => Some((Directive::Brewfile, &opts.items)),
            Self::Apply(_) | Self::Version => None,
        }
    }
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Directive file to apply
    #[arg(short, long, default_value = "brew.toml")]
    pub config: PathBuf,

    /// Skip directives of these kinds (tap, brew, cask, brewfile)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<Directive>,

    /// Run only directives of these kinds
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<Directive>,
}

impl ApplyOpts {
    /// Whether `directive` passes the `--only` and `--skip` filters.
    #[must_use]
    pub fn selects(&self, directive: Directive) -> bool {
        if !self.only.is_empty() {
            return self.only.contains(&directive);
        }
        !self.skip.contains(&directive)
    }
}

/// Items for a single ad-hoc directive.
#[derive(Parser, Debug, Clone)]
pub struct ItemsOpts {
    /// Package names, Brewfile paths or tap names; a tap may carry its remote
    /// as `"user/repo https://host/repo.git"`
    #[arg(required = true)]
    pub items: Vec<String>,
}
