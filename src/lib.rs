//! Declarative Homebrew reconciliation engine.
//!
//! Given lists of formulae, casks, taps and Brewfiles, makes sure each is
//! present on the host by driving the `brew` CLI as an external process.
//! Packages that are already installed are detected up front or recognised
//! from the install output, and individual failures are reported without
//! aborting the rest of the batch.
//!
//! The public API is organised into four layers:
//!
//! - **[`exec`]** — run external commands (`Executor` trait, timeouts, capture)
//! - **[`brew`]** — bootstrap, presence checks, install classification, taps, Brewfiles
//! - **[`directive`]** — the `tap` / `brew` / `cask` / `brewfile` dispatch boundary
//! - **[`commands`]** — top-level subcommand orchestration (`apply`, ad-hoc directives)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod brew;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod directive;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
