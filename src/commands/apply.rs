//! Command: apply a directive file.
use std::sync::Arc;

use anyhow::Result;

use crate::brew::BootstrapManager;
use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::Config;
use crate::context::Context;
use crate::directive::{DirectiveHandler, DirectiveReport};
use crate::logging::Logger;

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if the directive file cannot be loaded or any directive
/// fails.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("brew-reconcile {}", super::version::current()));

    log.stage("Loading directives");
    let config = Config::load(&opts.config)?;
    log.info(&format!(
        "loaded {} directive(s) from {}",
        config.directives.len(),
        opts.config.display()
    ));

    let working_dir = global.dir.clone().unwrap_or_else(|| config.working_dir());
    log.debug(&format!("working directory: {}", working_dir.display()));

    let settings = super::effective_settings(config.settings.clone(), global);
    let ctx = super::build_context(settings, working_dir, log);
    let _ = apply(&config, opts, &ctx);

    super::finish(log)
}

/// Run every selected directive block of `config` in file order.
///
/// Blocks filtered out by `--only`/`--skip` are not run and not recorded.
#[must_use]
pub fn apply(config: &Config, opts: &ApplyOpts, ctx: &Context) -> Vec<DirectiveReport> {
    let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
    let handler = DirectiveHandler::new(ctx, &bootstrap);

    config
        .directives
        .iter()
        .filter(|block| {
            let selected = opts.selects(block.directive);
            if !selected {
                ctx.log
                    .debug(&format!("skipping directive: {} (filtered)", block.directive));
            }
            selected
        })
        .map(|block| {
            super::run_directive(&handler, ctx.log.as_ref(), block.directive, &block.items)
        })
        .collect()
}
