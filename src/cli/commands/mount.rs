//! Mount and unmount commands
//!
//! Mount remote folders locally through rclone's FUSE bridge.

use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::{RclonewError, Result};
use crate::mount::{self as fuse, MountOutcome, UnmountOutcome};
use crate::process::SystemRunner;
use crate::rclone::remote_address;

/// Mount `<remote>:<remote_folder>` at `mount_point`
pub async fn mount(config: &AppConfig, remote_folder: &str, mount_point: &Path) -> Result<()> {
    let rclone = super::rclone_for(config)?;

    if !fuse::fuse_available() {
        println!();
        println!("{}", fuse::install_instructions());
        println!();
        return Err(RclonewError::Mount("FUSE not available".to_string()));
    }

    let mount_point = expand(mount_point);
    let address = remote_address(config.remote()?, remote_folder);

    println!();
    println!(
        "  {} {} → {}",
        style("Mounting").cyan(),
        style(&address).white(),
        style(mount_point.display()).green()
    );

    match fuse::mount(
        &rclone,
        config.remote()?,
        remote_folder,
        &mount_point,
        &config.vfs_cache_mode,
    )
    .await?
    {
        MountOutcome::Mounted => {
            println!("  {} {}", style("✓").green().bold(), mount_point.display());
        }
        MountOutcome::AlreadyMounted => {
            println!(
                "  {} {} (already mounted)",
                style("!").yellow().bold(),
                mount_point.display()
            );
        }
    }

    println!();
    Ok(())
}

/// Unmount a local mount point
pub async fn unmount(mount_point: &Path) -> Result<()> {
    let mount_point = expand(mount_point);
    let runner = SystemRunner::new();

    println!();
    println!(
        "  {} {}",
        style("Unmounting").cyan(),
        style(mount_point.display()).white()
    );

    match fuse::unmount(&runner, &mount_point).await? {
        UnmountOutcome::Unmounted => {
            println!("  {} Volume unmounted", style("✓").green().bold());
        }
        UnmountOutcome::NotMounted => {
            println!("  {} Not a mount point, nothing to do", style("○").dim());
        }
        UnmountOutcome::MissingMountPoint => {
            println!(
                "  {} {} does not exist",
                style("✕").red().bold(),
                mount_point.display()
            );
        }
    }

    println!();
    Ok(())
}

fn expand(path: &Path) -> std::path::PathBuf {
    std::path::PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}
