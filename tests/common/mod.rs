// Shared helpers for integration tests.
//
// Provides a scripted executor, a recording log sink and a fluent builder for
// a directive `Context`, so each integration test can drive the engine
// without spawning real `brew` processes.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use brew_reconcile::brew::BootstrapManager;
use brew_reconcile::config::Settings;
use brew_reconcile::context::Context;
use brew_reconcile::directive::DirectiveHandler;
use brew_reconcile::exec::{CommandSpec, ExecResult, Executor, OutputMode};
use brew_reconcile::logging::{DirectiveStatus, Log};
use brew_reconcile::platform::{Os, Platform};

/// Executor answering from a prefix-keyed rule table and recording every
/// rendered command line.
#[derive(Debug, Default)]
pub struct FakeBrew {
    rules: Mutex<Vec<(String, ExecResult)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBrew {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer commands starting with `prefix`. Earlier rules win.
    pub fn on(&self, prefix: &str, code: i32, stdout: &str, stderr: &str) {
        self.rules
            .lock()
            .expect("rules lock")
            .push((prefix.to_string(), ExecResult::from_code(code, stdout, stderr)));
    }

    /// Make every formula and cask look absent to the presence checks.
    pub fn nothing_installed(&self) {
        self.on("brew ls --versions", 1, "", "");
        self.on("brew list --cask", 1, "", "");
        self.on("brew info --cask", 0, "Not installed", "");
    }

    /// Forget all rules so later calls fall through to exit 0.
    pub fn clear_rules(&self) {
        self.rules.lock().expect("rules lock").clear();
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().expect("calls lock").clear();
    }
}

impl Executor for FakeBrew {
    fn run(&self, command: &CommandSpec, _: OutputMode) -> anyhow::Result<ExecResult> {
        let line = command.to_string();
        self.calls.lock().expect("calls lock").push(line.clone());
        Ok(self
            .rules
            .lock()
            .expect("rules lock")
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map_or_else(|| ExecResult::from_code(0, "", ""), |(_, r)| r.clone()))
    }

    fn which(&self, _: &str) -> bool {
        true
    }
}

/// [`Log`] sink that keeps every message as `"<level>: <text>"`.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("log lock").clone()
    }

    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.lines().iter().any(|l| l == line)
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push(format!("{level}: {msg}"));
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }

    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn record_directive(&self, name: &str, status: DirectiveStatus, _: Option<&str>) {
        self.push("record", &format!("{name} {status:?}"));
    }
}

/// A [`Context`] wired to a [`FakeBrew`] and a [`MemoryLog`].
pub struct Harness {
    pub ctx: Context,
    pub brew: Arc<FakeBrew>,
    pub log: Arc<MemoryLog>,
}

impl Harness {
    #[must_use]
    pub fn new(os: Os) -> Self {
        Self::with_settings(os, Settings::default())
    }

    #[must_use]
    pub fn with_settings(os: Os, settings: Settings) -> Self {
        let brew = FakeBrew::new();
        let log = MemoryLog::new();
        let ctx = Context::new(
            settings,
            Platform::new(os),
            Arc::<MemoryLog>::clone(&log),
            Arc::<FakeBrew>::clone(&brew),
        );
        Self { ctx, brew, log }
    }

    /// A bootstrap manager bound to this harness.
    #[must_use]
    pub fn bootstrap(&self) -> BootstrapManager<'_> {
        BootstrapManager::new(
            self.ctx.executor.as_ref(),
            self.ctx.log.as_ref(),
            &self.ctx.settings,
        )
    }

    /// Run `f` with a handler sharing one bootstrap manager.
    pub fn with_handler<T>(&self, f: impl FnOnce(&DirectiveHandler<'_>) -> T) -> T {
        let bootstrap = self.bootstrap();
        let handler = DirectiveHandler::new(&self.ctx, &bootstrap);
        f(&handler)
    }
}

/// Own a list of item strings.
#[must_use]
pub fn items(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Write a directive file into a fresh temporary directory.
#[must_use]
pub fn write_directive_file(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("brew.toml");
    std::fs::write(&path, content).expect("write directive file");
    (dir, path)
}

/// Create an empty file at `root/relative`, including parent directories.
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, "").expect("write file");
}
