use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::Result;

pub async fn show(config_path: Option<&Path>) -> Result<()> {
    let path = AppConfig::config_path(config_path)?;

    if !path.exists() {
        println!("{}", style("No configuration found.").dim());
        println!("Run {} to create one.", style("rclonew init").cyan());
        return Ok(());
    }

    let config = AppConfig::load(config_path)?;

    println!("{}", style("Current Configuration").bold().cyan());
    println!();
    print!("  Remote:         ");
    if config.remote.is_empty() {
        println!("{}", style("(none)").dim());
    } else {
        println!("{}", style(&config.remote).white());
    }
    println!("  rclone binary:  {}", style(&config.rclone_binary).white());
    println!("  Results dir:    {}", style(&config.results_dir).white());
    println!("  VFS cache mode: {}", style(&config.vfs_cache_mode).yellow());
    println!();
    println!("Config file: {}", style(path.display()).dim());

    Ok(())
}

pub async fn set(config_path: Option<&Path>, key: String, value: String) -> Result<()> {
    let mut config = AppConfig::load_for_update(config_path)?;

    config.set(&key, &value)?;
    config.save(config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green().bold(),
        style(&key).cyan(),
        style(&value).white()
    );

    Ok(())
}
