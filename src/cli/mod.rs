pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "rclonew")]
#[command(version)]
#[command(about = "Convenience wrapper around rclone")]
#[command(long_about = "Navigate, mount, compare and transfer rclone remotes.\n\nEvery operation is carried out by the rclone binary; rclonew builds the commands and checks the results.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (default: ~/.config/rclonew/config.yaml)
    #[arg(short, long, global = true, env = "RCLONEW_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the rclonew configuration
    Init,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Interactively navigate the remote's directories
    Navigate {
        /// Remote path to start from (default: root)
        #[arg(long, default_value = "")]
        start: String,
    },

    /// Mount a remote folder
    Mount {
        /// Remote folder to mount (default: root)
        #[arg(long, default_value = "")]
        remote_folder: String,

        /// Local mount point
        #[arg(long)]
        mount_point: PathBuf,
    },

    /// Unmount a mount point
    Unmount {
        /// Local mount point to unmount
        #[arg(long)]
        mount_point: PathBuf,
    },

    /// Compare a local folder with a remote folder by checksum
    Compare {
        /// Local folder
        #[arg(long)]
        local_folder: PathBuf,

        /// Remote folder
        #[arg(long, default_value = "")]
        remote_folder: String,
    },

    /// Upload a local file or directory under a remote directory
    Upload {
        /// Local file or directory to upload
        #[arg(long)]
        local_path: PathBuf,

        /// Existing remote directory to upload into
        #[arg(long, default_value = "")]
        remote_path: String,
    },

    /// Download a remote file or directory under a local directory
    Download {
        /// Remote file or directory to download
        #[arg(long)]
        remote_path: String,

        /// Existing local directory to download into
        #[arg(long)]
        local_path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config_path = self.config.as_deref();

        match self.command {
            Commands::Init => commands::init::execute(config_path).await,
            Commands::Config { command } => match command {
                ConfigCommands::Show => commands::config::show(config_path).await,
                ConfigCommands::Set { key, value } => {
                    commands::config::set(config_path, key, value).await
                }
            },
            Commands::Navigate { start } => {
                let config = AppConfig::load(config_path)?;
                commands::navigate::execute(&config, &start).await
            }
            Commands::Mount {
                remote_folder,
                mount_point,
            } => {
                let config = AppConfig::load(config_path)?;
                commands::mount::mount(&config, &remote_folder, &mount_point).await
            }
            Commands::Unmount { mount_point } => {
                commands::mount::unmount(&mount_point).await
            }
            Commands::Compare {
                local_folder,
                remote_folder,
            } => {
                let config = AppConfig::load(config_path)?;
                commands::compare::execute(&config, &local_folder, &remote_folder).await
            }
            Commands::Upload {
                local_path,
                remote_path,
            } => {
                let config = AppConfig::load(config_path)?;
                commands::transfer::upload(&config, &local_path, &remote_path).await
            }
            Commands::Download {
                remote_path,
                local_path,
            } => {
                let config = AppConfig::load(config_path)?;
                commands::transfer::download(&config, &remote_path, &local_path).await
            }
        }
    }
}
