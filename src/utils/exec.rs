//! External command execution utilities.
//!
//! Provides a Builder-based API for running the build, upload and
//! package-manager tools with captured output.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Captured: caller inspects the exit status
//! let output = Cmd::from_slice(&["python", "-m", "build"]).cwd(root).output()?;
//!
//! // Inherited stdio, exit status returned unchecked
//! Cmd::new("pip").args(["install", "--upgrade", "airobo"]).status()?;
//! ```

use crate::debug;
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Output},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Create from a command array (e.g., `["twine", "upload"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        match cmd.split_first() {
            Some((program, rest)) => Self::new(program).args(rest),
            None => Self::default(),
        }
    }

    /// Add a single argument. Empty arguments are passed through.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments, unchanged and in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Get the program name for error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command with captured stdout/stderr.
    ///
    /// Only spawn failures are errors; the caller decides what a non-zero
    /// exit status means. Stderr of a successful run is logged through the
    /// filter in verbose mode.
    pub fn output(self) -> Result<Output> {
        let name = self.program_name();
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);

        debug!("exec"; "running `{}`", name);
        let output = self
            .command()?
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        if output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            filter.log(&name, stderr.trim());
        }
        Ok(output)
    }

    /// Execute the command with inherited stdio and return its exit status.
    ///
    /// The status is not checked here.
    pub fn status(self) -> Result<ExitStatus> {
        let name = self.program_name();
        debug!("exec"; "running `{}`", name);
        self.command()?
            .status()
            .with_context(|| format!("Failed to execute `{name}`"))
    }

    /// Build the `std::process::Command`, resolving the program via `PATH`.
    fn command(&self) -> Result<Command> {
        let name = self.program_name();
        if name.is_empty() {
            bail!("Empty command");
        }

        let program = which::which(&self.program)
            .with_context(|| format!("`{name}` not found, install it or fix the configured command"))?;

        let mut cmd = Command::new(program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known warnings or irrelevant messages.
#[derive(Debug)]
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Log output lines that pass the filter (verbose mode only).
    pub fn log(&self, name: &str, output: &str) {
        let lines: Vec<_> = output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect();

        if !lines.is_empty() {
            debug!(name; "{}", lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi pattern"));
    re.replace_all(s, "")
}

/// Format the diagnostic for a command that exited non-zero.
///
/// Stderr comes first (ANSI stripped), then stdout if it has content.
pub fn failure_message(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = format!("`{name}` exited with {}", output.status);

    let stderr = strip_ansi(stderr.trim()).into_owned();
    if !stderr.is_empty() {
        msg.push('\n');
        msg.push_str(&stderr);
    }

    let stdout = strip_ansi(stdout.trim()).into_owned();
    if !stdout.is_empty() {
        msg.push_str("\nStdout:\n");
        msg.push_str(&stdout);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================
