//! Directive dispatch.
//!
//! A directive is one of four known names mapped to a list of string items.
//! [`DirectiveHandler`] bootstraps whatever the directive needs, hands the
//! items to the matching component and collapses the result to a `bool`.
use std::fmt;
use std::str::FromStr;

use crate::brew::{
    BootstrapManager, BundleInstaller, InstallReconciler, PackageKind, PackageRequest, RunResult,
    TapManager,
};
use crate::context::Context;
use crate::error::DirectiveError;
use crate::logging::DirectiveStatus;

/// The closed set of directives this engine handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Register repositories.
    Tap,
    /// Install formulae.
    Brew,
    /// Install casks (macOS only).
    Cask,
    /// Apply Brewfiles.
    Brewfile,
}

impl Directive {
    /// Every directive, in declaration order.
    pub const ALL: [Self; 4] = [Self::Tap, Self::Brew, Self::Cask, Self::Brewfile];

    /// The name used in directive files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Brew => "brew",
            Self::Cask => "cask",
            Self::Brewfile => "brewfile",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Directive {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| DirectiveError::Unknown(s.to_string()))
    }
}

/// Result of running one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveReport {
    /// The directive that ran.
    pub directive: Directive,
    /// Overall result recorded in the summary.
    pub status: DirectiveStatus,
    /// Per-package outcomes; empty for `tap` and `brewfile`.
    pub outcomes: RunResult,
}

impl DirectiveReport {
    /// `false` only when the directive failed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status != DirectiveStatus::Failed
    }

    fn new(directive: Directive, ok: bool) -> Self {
        Self {
            directive,
            status: if ok {
                DirectiveStatus::Ok
            } else {
                DirectiveStatus::Failed
            },
            outcomes: RunResult::default(),
        }
    }
}

/// Runs directives against a [`Context`], sharing one [`BootstrapManager`]
/// across every call.
pub struct DirectiveHandler<'a> {
    ctx: &'a Context,
    bootstrap: &'a BootstrapManager<'a>,
}

impl fmt::Debug for DirectiveHandler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveHandler")
            .field("ctx", self.ctx)
            .field("bootstrap", self.bootstrap)
            .finish()
    }
}

impl<'a> DirectiveHandler<'a> {
    /// Create a handler sharing `bootstrap` across every directive it runs.
    #[must_use]
    pub const fn new(ctx: &'a Context, bootstrap: &'a BootstrapManager<'a>) -> Self {
        Self { ctx, bootstrap }
    }

    /// Whether `name` is a directive this handler knows.
    #[must_use]
    pub fn can_handle(&self, name: &str) -> bool {
        name.parse::<Directive>().is_ok()
    }

    /// Run the directive called `name` over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Unknown`] if `name` is not a known directive.
    /// Failures while running a known directive are reported as `Ok(false)`.
    pub fn handle(&self, name: &str, data: &[String]) -> Result<bool, DirectiveError> {
        let directive = name.parse::<Directive>()?;
        Ok(self.run(directive, data).succeeded())
    }

    /// Run `directive` over `data` and report per-package detail.
    #[must_use]
    pub fn run(&self, directive: Directive, data: &[String]) -> DirectiveReport {
        match directive {
            Directive::Tap => self.tap(data),
            Directive::Brew => self.install(directive, PackageKind::Formula, data),
            Directive::Cask => {
                if !self.ctx.platform.supports_casks() {
                    self.ctx.log.debug(&format!(
                        "cask directive does not apply on {}",
                        self.ctx.platform.os
                    ));
                    return DirectiveReport {
                        directive,
                        status: DirectiveStatus::NotApplicable,
                        outcomes: RunResult::default(),
                    };
                }
                self.install(directive, PackageKind::Cask, data)
            }
            Directive::Brewfile => self.brewfile(data),
        }
    }

    fn tap(&self, names: &[String]) -> DirectiveReport {
        self.bootstrap.ensure_runtime();
        let batch = TapManager::new(
            self.ctx.executor.as_ref(),
            self.ctx.log.as_ref(),
            self.ctx.manager(),
        )
        .tap_all(names);
        DirectiveReport::new(Directive::Tap, batch.succeeded())
    }

    fn install(&self, directive: Directive, kind: PackageKind, ids: &[String]) -> DirectiveReport {
        match kind {
            PackageKind::Formula => self.bootstrap.ensure_runtime(),
            PackageKind::Cask => self.bootstrap.ensure_cask_extension(),
        }

        let outcomes = InstallReconciler::new(
            self.ctx.executor.as_ref(),
            self.ctx.log.as_ref(),
            self.ctx.manager(),
            self.ctx.markers(),
        )
        .reconcile(&PackageRequest::all(kind, ids));

        let ok = outcomes.all_succeeded();
        if ok {
            self.ctx.log.info("All packages have been installed");
        } else {
            self.ctx.log.error("Some packages were not installed");
        }
        DirectiveReport {
            outcomes,
            ..DirectiveReport::new(directive, ok)
        }
    }

    fn brewfile(&self, paths: &[String]) -> DirectiveReport {
        // A Brewfile may list casks; their tap only exists where casks do.
        if self.ctx.platform.supports_casks() {
            self.bootstrap.ensure_cask_extension();
        } else {
            self.bootstrap.ensure_runtime();
        }
        let ok = BundleInstaller::new(
            self.ctx.executor.as_ref(),
            self.ctx.log.as_ref(),
            self.ctx.manager(),
        )
        .install_files(paths);
        DirectiveReport::new(Directive::Brewfile, ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::brew::InstallOutcome;
    use crate::config::Settings;
    use crate::exec::test_helpers::ScriptedExecutor;
    use crate::logging::test_helpers::RecordingLog;
    use crate::platform::{Os, Platform};

    fn context(os: Os, exec: &Arc<ScriptedExecutor>, log: &Arc<RecordingLog>) -> Context {
        Context::new(
            Settings::default(),
            Platform::new(os),
            Arc::<RecordingLog>::clone(log),
            Arc::<ScriptedExecutor>::clone(exec),
        )
    }

    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for directive in Directive::ALL {
            assert_eq!(directive.name().parse::<Directive>(), Ok(directive));
        }
        assert_eq!(
            "apt".parse::<Directive>(),
            Err(DirectiveError::Unknown("apt".to_string()))
        );
    }

    #[test]
    fn can_handle_only_known_names() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::MacOs, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        assert!(handler.can_handle("brewfile"));
        assert!(!handler.can_handle("Brew"));
        assert!(!handler.can_handle("apt"));
    }

    #[test]
    fn unknown_directive_fails_loudly() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::MacOs, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        let err = handler.handle("npm", &items(&["left-pad"])).unwrap_err();
        assert_eq!(err, DirectiveError::Unknown("npm".to_string()));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn cask_is_a_no_op_off_macos() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::Linux, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        let report = handler.run(Directive::Cask, &items(&["firefox"]));
        assert_eq!(report.status, DirectiveStatus::NotApplicable);
        assert!(report.succeeded());
        assert!(handler.handle("cask", &items(&["firefox"])).unwrap());
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn cask_on_macos_taps_extension_before_checking() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::MacOs, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        let report = handler.run(Directive::Cask, &items(&["firefox"]));
        assert!(report.succeeded());
        assert_eq!(
            report.outcomes.outcome_of("firefox"),
            Some(InstallOutcome::AlreadyPresent)
        );
        assert_eq!(
            exec.calls(),
            [
                "brew update",
                "brew tap caskroom/cask",
                "brew list --cask firefox"
            ]
        );
    }

    #[test]
    fn brew_reports_failure_but_attempts_every_package() {
        let exec = Arc::new(
            ScriptedExecutor::new()
                .on("brew ls --versions", 1, "", "")
                .on("brew install y", 1, "", "Error: no bottle available"),
        );
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::Linux, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        let report = handler.run(Directive::Brew, &items(&["x", "y", "z"]));
        assert!(!report.succeeded());
        assert_eq!(report.outcomes.outcome_of("x"), Some(InstallOutcome::Installed));
        assert_eq!(report.outcomes.outcome_of("y"), Some(InstallOutcome::Failed));
        assert_eq!(report.outcomes.outcome_of("z"), Some(InstallOutcome::Installed));
        assert!(log.contains("error: Some packages were not installed"));
    }

    #[test]
    fn brew_success_logs_summary_line() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::Linux, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        assert!(handler.handle("brew", &items(&["git"])).unwrap());
        assert!(log.contains("info: git is already installed"));
        assert!(log.contains("info: All packages have been installed"));
    }

    #[test]
    fn bootstrap_runs_once_across_directives() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::MacOs, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        let _ = handler.run(Directive::Tap, &items(&["a/b"]));
        let _ = handler.run(Directive::Brew, &items(&["git"]));
        let _ = handler.run(Directive::Cask, &items(&["firefox"]));

        assert_eq!(exec.count("brew update"), 1);
        assert_eq!(exec.count("brew tap caskroom/cask"), 1);
    }

    #[test]
    fn brewfile_skips_cask_tap_off_macos() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::Linux, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        assert!(handler.handle("brewfile", &items(&["Brewfile"])).unwrap());
        assert_eq!(exec.calls(), ["brew update", "brew bundle --file=Brewfile"]);
    }

    #[test]
    fn brewfile_on_macos_taps_cask_repository_before_bundling() {
        let exec = Arc::new(ScriptedExecutor::new());
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::MacOs, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        assert!(handler.handle("brewfile", &items(&["Brewfile"])).unwrap());
        assert_eq!(
            exec.calls(),
            [
                "brew update",
                "brew tap caskroom/cask",
                "brew bundle --file=Brewfile"
            ]
        );
    }

    #[test]
    fn failed_tap_fails_directive() {
        let exec = Arc::new(ScriptedExecutor::new().on("brew tap b", 1, "", ""));
        let log = Arc::new(RecordingLog::new());
        let ctx = context(Os::Linux, &exec, &log);
        let bootstrap = BootstrapManager::new(ctx.executor.as_ref(), ctx.log.as_ref(), &ctx.settings);
        let handler = DirectiveHandler::new(&ctx, &bootstrap);

        assert!(!handler.handle("tap", &items(&["a", "b", "c"])).unwrap());
        assert_eq!(exec.count("brew tap c"), 0);
    }
}
