//! Uploading and downloading files or directories with `rclone copy`
//!
//! Both directions copy the source *under* an existing destination directory
//! and refuse to overwrite an entry of the same name.

use std::path::{Component, Path, PathBuf};

use crate::error::{RclonewError, Result};
use crate::process::{ProcessOutput, ProcessRunner};
use crate::rclone::{remote_address, Rclone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// Exists as a directory (`rclone lsd`)
    Dir,
    /// Exists as anything (`rclone lsf` lists something)
    FileOrDir,
}

/// Final component of a path when it is a plain name. Trailing separators
/// and `.` segments are ignored; a path ending in `..` or a root has none.
pub fn base_name(path: &Path) -> Option<String> {
    match path.components().last()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Name the local source will have on the remote. Symlinks keep their own
/// name; only paths like `.` or `dir/..` are resolved first.
fn local_base_name(path: &Path) -> Result<Option<String>> {
    match base_name(path) {
        Some(name) => Ok(Some(name)),
        None => Ok(base_name(&std::fs::canonicalize(path)?)),
    }
}

/// `<dir>/<name>` on the remote, without doubling slashes
fn remote_child(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Check whether `address` (`remote:path`) exists on the remote.
///
/// A failed listing whose stderr says "not found" means absent; any other
/// failure is an error.
pub async fn remote_path_exists<R: ProcessRunner>(
    rclone: &Rclone<R>,
    address: &str,
    mode: Existence,
) -> Result<bool> {
    let output = match mode {
        Existence::Dir => rclone.lsd(address).await,
        Existence::FileOrDir => rclone.lsf(address).await,
    }
    .map_err(|e| {
        tracing::error!("Error accessing remote path '{}': {}", address, e);
        e
    })?;

    if output.success() {
        return Ok(match mode {
            Existence::Dir => true,
            Existence::FileOrDir => !output.stdout.trim().is_empty(),
        });
    }

    if output.stderr.to_lowercase().contains("not found") {
        return Ok(false);
    }

    tracing::error!("Error checking remote path: {}", output.stderr.trim());
    Err(RclonewError::CommandFailed {
        program: rclone.binary().to_string(),
        code: output.code,
        stderr: output.stderr.trim().to_string(),
    })
}

fn copy_failed(program: &str, output: ProcessOutput) -> RclonewError {
    let stderr = output.stderr.trim();
    RclonewError::CommandFailed {
        program: program.to_string(),
        code: output.code,
        stderr: if stderr.is_empty() {
            "Unknown error".to_string()
        } else {
            stderr.to_string()
        },
    }
}

/// Copy `local_path` under `<remote>:<remote_path>`; returns the remote target
pub async fn upload<R: ProcessRunner>(
    rclone: &Rclone<R>,
    remote: &str,
    remote_path: &str,
    local_path: &Path,
) -> Result<String> {
    if !local_path.exists() {
        return Err(RclonewError::Transfer(format!(
            "Source '{}' does not exist.",
            local_path.display()
        )));
    }

    let destination = remote_address(remote, remote_path);
    if !remote_path_exists(rclone, &destination, Existence::Dir).await? {
        tracing::error!("Destination '{}' does not exist.", destination);
        return Err(RclonewError::Transfer(format!(
            "Destination '{}' does not exist.",
            destination
        )));
    }

    let name = local_base_name(local_path)?.ok_or_else(|| {
        RclonewError::Transfer(format!("Cannot upload '{}': no file name", local_path.display()))
    })?;
    let target = remote_child(remote_path, &name);
    let target_address = remote_address(remote, &target);

    if remote_path_exists(rclone, &target_address, Existence::FileOrDir).await? {
        tracing::error!(
            "A file/dir named '{}' already exists under destination '{}'.",
            name,
            destination
        );
        return Err(RclonewError::Transfer(format!(
            "A file/dir named '{}' already exists under destination '{}'.",
            name, destination
        )));
    }

    tracing::info!(
        "Uploading '{}' to '{}'...",
        local_path.display(),
        target_address
    );

    let output = rclone
        .copy(&local_path.to_string_lossy(), &target_address)
        .await?;

    if !output.success() {
        let err = copy_failed(rclone.binary(), output);
        tracing::error!(
            "Failed to upload '{}' to '{}': {}",
            local_path.display(),
            target_address,
            err
        );
        return Err(err);
    }

    tracing::info!("Upload completed successfully.");
    Ok(target_address)
}

/// Copy `<remote>:<remote_path>` under the local directory `local_path`;
/// returns the local target
pub async fn download<R: ProcessRunner>(
    rclone: &Rclone<R>,
    remote: &str,
    remote_path: &str,
    local_path: &Path,
) -> Result<PathBuf> {
    if !local_path.is_dir() {
        tracing::error!(
            "Destination '{}' does not exist or is not a directory.",
            local_path.display()
        );
        return Err(RclonewError::Transfer(format!(
            "Destination '{}' does not exist or is not a directory.",
            local_path.display()
        )));
    }

    let name = base_name(Path::new(remote_path)).ok_or_else(|| {
        RclonewError::Transfer(format!("Cannot download '{}': no file name", remote_path))
    })?;
    let target = local_path.join(&name);

    if target.exists() {
        tracing::error!(
            "A file/dir named '{}' already exists under '{}'.",
            name,
            local_path.display()
        );
        return Err(RclonewError::Transfer(format!(
            "A file/dir named '{}' already exists under '{}'.",
            name,
            local_path.display()
        )));
    }

    let source = remote_address(remote, remote_path);
    tracing::info!("Downloading '{}' to '{}'...", source, target.display());

    let output = rclone.copy(&source, &target.to_string_lossy()).await?;

    if !output.success() {
        let err = copy_failed(rclone.binary(), output);
        tracing::error!(
            "Failed to download '{}' to '{}': {}",
            source,
            target.display(),
            err
        );
        return Err(err);
    }

    tracing::info!("Download completed successfully.");
    Ok(target)
}
