//! Top-level subcommand orchestration.
pub mod apply;
pub mod directive;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::context::Context;
use crate::directive::{Directive, DirectiveHandler, DirectiveReport};
use crate::exec::SystemExecutor;
use crate::logging::{DirectiveStatus, Log, Logger};
use crate::platform::Platform;

/// Apply command-line overrides on top of file settings.
#[must_use]
pub fn effective_settings(mut settings: Settings, global: &GlobalOpts) -> Settings {
    if let Some(secs) = global.timeout {
        settings.timeout_secs = Some(secs);
    }
    settings.bootstrap &= global.bootstrap;
    settings
}

/// Build a production [`Context`] running commands in `working_dir`.
#[must_use]
pub fn build_context(settings: Settings, working_dir: PathBuf, log: &Arc<Logger>) -> Context {
    let executor = SystemExecutor::new(working_dir).with_timeout(settings.timeout());
    Context::new(
        settings,
        Platform::detect(),
        Arc::<Logger>::clone(log),
        Arc::new(executor),
    )
}

/// Run one directive under its own stage header and record the result.
#[must_use]
pub fn run_directive(
    handler: &DirectiveHandler<'_>,
    log: &dyn Log,
    directive: Directive,
    items: &[String],
) -> DirectiveReport {
    let label = label(directive, items.len());
    log.stage(&label);

    let report = handler.run(directive, items);
    let failed: Vec<&str> = report
        .outcomes
        .failures()
        .into_iter()
        .map(|request| request.id.as_str())
        .collect();
    let message = (report.status == DirectiveStatus::Failed && !failed.is_empty())
        .then(|| format!("not installed: {}", failed.join(", ")));
    log.record_directive(&label, report.status, message.as_deref());
    report
}

/// Summary label for a directive run, e.g. `brew (1 item)` or `tap (3 items)`.
fn label(directive: Directive, count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{directive} ({count} {noun})")
}

/// Print the summary and bail if any directive failed.
///
/// # Errors
///
/// Returns an error if one or more directives recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} directive(s) failed");
    }
    Ok(())
}
