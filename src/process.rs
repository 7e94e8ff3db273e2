//! External process invocation
//!
//! Every external program (rclone, mountpoint, fusermount) is reached through
//! the [`ProcessRunner`] trait so the rest of the crate can be exercised
//! against a fake runner without ever starting a real process.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{RclonewError, Result};

/// What to do with the child's standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutMode {
    /// Capture stdout into [`ProcessOutput::stdout`]
    #[default]
    Capture,
    /// Let the child write straight to our terminal (progress output)
    Inherit,
}

/// A program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub stdout: StdoutMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: StdoutMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn inherit_stdout(mut self) -> Self {
        self.stdout = StdoutMode::Inherit;
        self
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into [`RclonewError::CommandFailed`]
    pub fn check(self, program: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(RclonewError::CommandFailed {
                program: program.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Capability to run external programs
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// A non-zero exit is NOT an error here; callers decide what it means.
    /// Failing to start the program is [`RclonewError::Spawn`].
    async fn output(&self, spec: &CommandSpec) -> Result<ProcessOutput>;

    /// Start the command in its own process group with stdio detached and
    /// return without waiting for it.
    async fn spawn_detached(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands on the local system with `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn output(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        tracing::debug!("Running: {}", spec);

        let stdout = match spec.stdout {
            StdoutMode::Capture => Stdio::piped(),
            StdoutMode::Inherit => Stdio::inherit(),
        };

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RclonewError::spawn(&spec.program, e))?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn spawn_detached(&self, spec: &CommandSpec) -> Result<()> {
        tracing::debug!("Spawning detached: {}", spec);

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        #[cfg(unix)]
        command.process_group(0);

        let child = command
            .spawn()
            .map_err(|e| RclonewError::spawn(&spec.program, e))?;

        tracing::debug!("Detached {} (pid {:?})", spec.program, child.id());
        Ok(())
    }
}

/// Locate a program on `PATH`, for diagnostics
pub fn locate(program: &str) -> Option<std::path::PathBuf> {
    which::which(program).ok()
}
