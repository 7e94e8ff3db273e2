//! Mounting remote folders locally with `rclone mount`
//!
//! # Flow
//! 1. User runs `rclonew mount --remote-folder docs --mount-point ~/mnt/docs`
//! 2. The mount point is created if needed
//! 3. `rclone mount` is started detached and keeps serving the FUSE mount
//!    after this process exits
//!
//! # Requirements
//! - Linux: fuse3 (`fusermount`, `mountpoint` from util-linux)
//! - macOS: macFUSE

use std::path::Path;

use crate::error::{RclonewError, Result};
use crate::process::{CommandSpec, ProcessRunner};
use crate::rclone::{remote_address, Rclone};

/// `mountpoint -q` exit code for "exists but is not a mount point"
const MOUNTPOINT_NOT_MOUNTED: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    AlreadyMounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmountOutcome {
    Unmounted,
    NotMounted,
    MissingMountPoint,
}

/// Check if FUSE is available on this machine
pub fn fuse_available() -> bool {
    #[cfg(target_os = "macos")]
    {
        Path::new("/Library/Filesystems/macfuse.fs").exists()
            || Path::new("/usr/local/lib/libfuse.dylib").exists()
    }

    #[cfg(target_os = "linux")]
    {
        Path::new("/dev/fuse").exists()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        false
    }
}

/// Installation hint shown when FUSE or rclone is missing
pub fn install_instructions() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "rclone mount needs macFUSE.\n\n\
         Install with Homebrew:\n\
         brew install rclone macfuse\n\n\
         After installation, restart your computer.\n\
         You may need to allow the kernel extension in:\n\
         System Settings > Privacy & Security"
    }

    #[cfg(target_os = "linux")]
    {
        "rclone mount needs FUSE.\n\n\
         Install with your package manager:\n\
         Ubuntu/Debian: sudo apt install rclone fuse3\n\
         Fedora: sudo dnf install rclone fuse3\n\
         Arch: sudo pacman -S rclone fuse3"
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        "rclone mount is not supported on this platform."
    }
}

/// Check whether `mount_point` is an active mount point
pub async fn is_mounted<R: ProcessRunner>(runner: &R, mount_point: &Path) -> Result<bool> {
    if !mount_point.exists() {
        tracing::warn!("Path '{}' does not exist.", mount_point.display());
        return Ok(false);
    }

    let spec = CommandSpec::new("mountpoint")
        .arg("-q")
        .arg(mount_point.to_string_lossy());

    let output = runner.output(&spec).await.map_err(|e| {
        tracing::error!("Error accessing mount point '{}': {}", mount_point.display(), e);
        e
    })?;

    match output.code {
        Some(0) => Ok(true),
        Some(MOUNTPOINT_NOT_MOUNTED) => Ok(false),
        code => {
            tracing::error!(
                "Unexpected error checking mount point '{}': {:?}",
                mount_point.display(),
                code
            );
            Err(RclonewError::CommandFailed {
                program: spec.program,
                code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// Mount `<remote>:<remote_path>` at `mount_point`
pub async fn mount<R: ProcessRunner>(
    rclone: &Rclone<R>,
    remote: &str,
    remote_path: &str,
    mount_point: &Path,
    vfs_cache_mode: &str,
) -> Result<MountOutcome> {
    if is_mounted(rclone.runner(), mount_point).await? {
        tracing::error!("'{}' is already mounted.", mount_point.display());
        return Ok(MountOutcome::AlreadyMounted);
    }

    if !mount_point.exists() {
        tracing::info!("Creating mount point directory: '{}'", mount_point.display());
        tokio::fs::create_dir_all(mount_point).await.map_err(|e| {
            RclonewError::Mount(format!(
                "Failed to create mount point {}: {}",
                mount_point.display(),
                e
            ))
        })?;
    }

    let address = remote_address(remote, remote_path);
    tracing::info!("Mounting '{}' to '{}'...", address, mount_point.display());

    rclone
        .mount(&address, &mount_point.to_string_lossy(), vfs_cache_mode)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to mount '{}' to '{}': {}",
                remote_path,
                mount_point.display(),
                e
            );
            e
        })?;

    tracing::info!("Mounted '{}' to '{}'", remote_path, mount_point.display());
    Ok(MountOutcome::Mounted)
}

/// Lazily unmount a FUSE mount point
pub async fn unmount<R: ProcessRunner>(runner: &R, mount_point: &Path) -> Result<UnmountOutcome> {
    if !mount_point.exists() {
        tracing::error!(
            "Mount point '{}' does not exist. Cannot unmount.",
            mount_point.display()
        );
        return Ok(UnmountOutcome::MissingMountPoint);
    }

    if !is_mounted(runner, mount_point).await? {
        tracing::info!(
            "'{}' is not a mount point. Nothing to unmount.",
            mount_point.display()
        );
        return Ok(UnmountOutcome::NotMounted);
    }

    tracing::info!("Unmounting '{}'...", mount_point.display());

    let spec = CommandSpec::new("fusermount")
        .arg("-uz")
        .arg(mount_point.to_string_lossy());

    runner
        .output(&spec)
        .await?
        .check(&spec.program)
        .map_err(|e| {
            tracing::error!("Failed to unmount '{}': {}", mount_point.display(), e);
            e
        })?;

    tracing::info!("Unmounted '{}'", mount_point.display());
    Ok(UnmountOutcome::Unmounted)
}
