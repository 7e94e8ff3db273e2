//! Upload and download commands

use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::Result;
use crate::transfer;

pub async fn upload(config: &AppConfig, local_path: &Path, remote_path: &str) -> Result<()> {
    let rclone = super::rclone_for(config)?;
    let local_path = shellexpand::tilde(&local_path.to_string_lossy()).to_string();

    let target = transfer::upload(&rclone, config.remote()?, remote_path, Path::new(&local_path)).await?;

    println!("  {} Uploaded to {}", style("✓").green().bold(), style(target).green());
    Ok(())
}

pub async fn download(config: &AppConfig, remote_path: &str, local_path: &Path) -> Result<()> {
    let rclone = super::rclone_for(config)?;
    let local_path = shellexpand::tilde(&local_path.to_string_lossy()).to_string();

    let target = transfer::download(&rclone, config.remote()?, remote_path, Path::new(&local_path)).await?;

    println!(
        "  {} Downloaded to {}",
        style("✓").green().bold(),
        style(target.display()).green()
    );
    Ok(())
}
