//! External process execution.
//!
//! Commands are described by [`CommandSpec`] (program + argument vector) and
//! spawned directly, so package identifiers never pass through a shell. Only
//! specs built with [`CommandSpec::shell`] are handed to the host shell; the
//! bootstrap install script is the single caller that needs one.
//!
//! The runner never fails on a non-zero exit: the status is reported in
//! [`ExecResult`] and each caller decides what it means. An `Err` is only
//! returned when the process could not be spawned or was killed by the
//! configured timeout.
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};

use crate::error::ExecError;

/// How often a child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What to do with a child's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Send both streams to the null device.
    Discard,
    /// Collect both streams for inspection.
    Capture,
}

/// A command line as a structured argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    needs_shell: bool,
}

impl CommandSpec {
    /// A command that is spawned directly, without a shell.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            needs_shell: false,
        }
    }

    /// A script interpreted by the host shell.
    ///
    /// Shell metacharacters in `script` are live. Never interpolate
    /// unvalidated input into it.
    #[must_use]
    pub fn shell(script: impl Into<String>) -> Self {
        Self {
            program: script.into(),
            args: Vec::new(),
            env: Vec::new(),
            needs_shell: true,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an extra environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Argument vector (always empty for shell commands).
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Whether this spec must be run through the host shell.
    #[must_use]
    pub const fn needs_shell(&self) -> bool {
        self.needs_shell
    }

    fn to_command(&self) -> Command {
        let mut cmd = if self.needs_shell {
            shell_command(&self.program)
        } else {
            let mut cmd = Command::new(&self.program);
            cmd.args(&self.args);
            cmd
        };
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(windows)]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", script]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", script]);
    cmd
}

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (empty when discarded).
    pub stdout: String,
    /// Captured standard error (empty when discarded).
    pub stderr: String,
    /// Whether the process exited zero.
    pub success: bool,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Build a result from an exit code and captured text.
    #[must_use]
    pub fn from_code(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: code == 0,
            code: Some(code),
        }
    }

    /// Exit code, or `-1` when the process was terminated by a signal.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }

    /// stdout followed by stderr.
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        format!("{}\n{}", self.stdout, self.stderr)
    }

    fn new(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution so the engine can be driven by a
/// scripted executor in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be spawned or was
    /// killed by a timeout. A non-zero exit is reported in [`ExecResult`].
    fn run(&self, command: &CommandSpec, mode: OutputMode) -> Result<ExecResult>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// Runs commands on the host in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl SystemExecutor {
    /// Create an executor rooted at `working_dir` that waits indefinitely.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Kill commands that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory every command is started in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl Executor for SystemExecutor {
    fn run(&self, command: &CommandSpec, mode: OutputMode) -> Result<ExecResult> {
        let mut cmd = command.to_command();
        cmd.current_dir(&self.working_dir).stdin(Stdio::null());
        match mode {
            OutputMode::Discard => {
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
            }
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to execute: {command}"))?;

        // Drain both pipes concurrently so a chatty child cannot block on a
        // full pipe while we wait for it.
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = wait_for(&mut child, self.timeout, command)?;
        Ok(ExecResult::new(
            status,
            &join_reader(stdout),
            &join_reader(stderr),
        ))
    }

    fn which(&self, program: &str) -> bool {
        which(program)
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).ok();
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn wait_for(child: &mut Child, timeout: Option<Duration>, command: &CommandSpec) -> Result<ExitStatus> {
    let Some(limit) = timeout else {
        return child
            .wait()
            .with_context(|| format!("waiting for: {command}"));
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child
            .try_wait()
            .with_context(|| format!("waiting for: {command}"))?
        {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            return Err(ExecError::TimedOut {
                command: command.to_string(),
                after: limit,
            }
            .into());
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Check if a program is available on `PATH`.
#[must_use]
pub fn which(program: &str) -> bool {
    which::which(program).is_ok()
}
