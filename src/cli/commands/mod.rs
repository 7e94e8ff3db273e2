pub mod compare;
pub mod config;
pub mod init;
pub mod mount;
pub mod navigate;
pub mod transfer;

use crate::config::AppConfig;
use crate::error::Result;
use crate::process::{locate, SystemRunner};
use crate::rclone::Rclone;

/// Validate the config and build the rclone facade for a command
fn rclone_for(config: &AppConfig) -> Result<Rclone<SystemRunner>> {
    config.validate()?;

    if locate(&config.rclone_binary).is_none() {
        tracing::warn!("'{}' was not found on PATH", config.rclone_binary);
    }

    Ok(Rclone::new(SystemRunner::new(), &config.rclone_binary))
}
