use std::path::Path;

use console::style;
use dialoguer::{Confirm, Input, Select};

use crate::config::{AppConfig, VFS_CACHE_MODES};
use crate::error::Result;

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    println!("{}", style("rclonew setup").bold().cyan());
    println!("Let's point rclonew at one of your rclone remotes.\n");

    let path = AppConfig::config_path(config_path)?;
    if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            println!("{}", style("Cancelled.").dim());
            return Ok(());
        }
    }

    let remote: String = Input::new()
        .with_prompt("rclone remote name (see 'rclone listremotes')")
        .default("gdrive".to_string())
        .interact_text()?;

    let rclone_binary: String = Input::new()
        .with_prompt("rclone binary")
        .default("rclone".to_string())
        .interact_text()?;

    let results_dir: String = Input::new()
        .with_prompt("Directory for comparison reports")
        .default("results".to_string())
        .interact_text()?;

    let mode_idx = Select::new()
        .with_prompt("VFS cache mode for mounts")
        .items(&VFS_CACHE_MODES)
        .default(2)
        .interact()?;

    let config = AppConfig {
        remote: remote.trim_end_matches(':').to_string(),
        rclone_binary,
        results_dir,
        vfs_cache_mode: VFS_CACHE_MODES[mode_idx].to_string(),
    };
    config.validate()?;

    let written = config.save(config_path)?;

    println!("\n{}", style("✓ Configuration saved!").green().bold());
    println!("Config file: {}", style(written.display()).dim());
    println!(
        "\nRun {} to browse your remote.",
        style("rclonew navigate").cyan()
    );

    Ok(())
}
