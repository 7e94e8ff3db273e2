//! Argument vectors for the rclone operations this tool uses
//!
//! Nothing here interprets results beyond what the callers ask for; the
//! meaning of a non-zero exit is decided per operation by the caller.

use crate::error::Result;
use crate::process::{CommandSpec, ProcessOutput, ProcessRunner};

/// Build the `<remote>:<path>` address rclone expects
pub fn remote_address(remote: &str, path: &str) -> String {
    format!("{}:{}", remote, path)
}

/// Thin facade over the rclone binary
pub struct Rclone<R: ProcessRunner> {
    runner: R,
    binary: String,
}

impl<R: ProcessRunner> Rclone<R> {
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.binary)
    }

    /// `rclone lsf <address> --dirs-only`
    pub async fn lsf_dirs(&self, address: &str) -> Result<ProcessOutput> {
        let spec = self.command().args(["lsf", address, "--dirs-only"]);
        self.runner.output(&spec).await
    }

    /// `rclone lsd <address>`
    pub async fn lsd(&self, address: &str) -> Result<ProcessOutput> {
        let spec = self.command().args(["lsd", address]);
        self.runner.output(&spec).await
    }

    /// `rclone lsf <address>`
    pub async fn lsf(&self, address: &str) -> Result<ProcessOutput> {
        let spec = self.command().args(["lsf", address]);
        self.runner.output(&spec).await
    }

    /// Start `rclone mount` in the background; it keeps running after we exit.
    pub async fn mount(&self, address: &str, mount_point: &str, vfs_cache_mode: &str) -> Result<()> {
        let spec = self
            .command()
            .args(["mount", address, mount_point, "--vfs-cache-mode", vfs_cache_mode]);
        self.runner.spawn_detached(&spec).await
    }

    /// `rclone check <a> <b> --checksum`
    pub async fn check(&self, first: &str, second: &str) -> Result<ProcessOutput> {
        let spec = self.command().args(["check", first, second, "--checksum"]);
        self.runner.output(&spec).await
    }

    /// `rclone copy --progress --checksum <src> <dst>`, progress on our stdout
    pub async fn copy(&self, source: &str, destination: &str) -> Result<ProcessOutput> {
        let spec = self
            .command()
            .args(["copy", "--progress", "--checksum", source, destination])
            .inherit_stdout();
        self.runner.output(&spec).await
    }
}
