//! Command: run a single directive given on the command line.
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::brew::BootstrapManager;
use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::directive::{Directive, DirectiveHandler};
use crate::logging::Logger;

/// Run `directive` over `items` with default settings plus CLI overrides.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the working directory
/// cannot be determined, or the directive fails.
pub fn run(
    global: &GlobalOpts,
    directive: Directive,
    items: &[String],
    log: &Arc<Logger>,
) -> Result<()> {
    log.info(&format!("brew-reconcile {}", super::version::current()));

    let settings = super::effective_settings(Settings::default(), global);
    settings.validate()?;

    let working_dir = match &global.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    log.debug(&format!("working directory: {}", working_dir.display()));

    let ctx = super::build_context(settings, working_dir, log);
    let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
    let handler = DirectiveHandler::new(&ctx, &bootstrap);
    let _ = super::run_directive(&handler, ctx.log.as_ref(), directive, items);

    super::finish(log)
}
