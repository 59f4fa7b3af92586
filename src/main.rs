//! `brew-reconcile` command-line entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use brew_reconcile::cli::{Cli, Command};
use brew_reconcile::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return Ok(());
    }

    let log_file = logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(logging::Logger::new().with_log_file(log_file));

    match (&args.command, args.command.directive()) {
        (Command::Apply(opts), _) => commands::apply::run(&args.global, opts, &log),
        (_, Some((directive, items))) => {
            commands::directive::run(&args.global, directive, items, &log)
        }
        (_, None) => Ok(()),
    }
}
