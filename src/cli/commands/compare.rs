use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::compare::{compare_folders, Comparison};
use crate::config::AppConfig;
use crate::error::Result;
use crate::rclone::remote_address;

pub async fn execute(config: &AppConfig, local_folder: &Path, remote_folder: &str) -> Result<()> {
    let rclone = super::rclone_for(config)?;
    let local = local_folder.to_string_lossy();
    let remote = remote_address(config.remote()?, remote_folder);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}").map_err(anyhow::Error::from)?,
    );
    spinner.set_message(format!("Checking {} against {}", local, remote));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = compare_folders(&rclone, &local, &remote, &config.results_dir()).await;
    spinner.finish_and_clear();

    println!();
    match result? {
        Comparison::Identical => {
            println!("  {} Folders are identical", style("✓").green().bold());
        }
        Comparison::Differences { report } => {
            println!("  {} Differences detected", style("✕").red().bold());
            println!("  Report: {}", style(report.display()).dim());
        }
    }
    println!();

    Ok(())
}
