use std::io::{stdin, stdout};

use crate::config::AppConfig;
use crate::error::Result;
use crate::navigate::{CachedLister, Navigator, RcloneLister};

pub async fn execute(config: &AppConfig, start: &str) -> Result<()> {
    let rclone = super::rclone_for(config)?;
    let lister = CachedLister::new(RcloneLister::new(rclone));
    let mut navigator = Navigator::new(lister, config.remote()?, start);

    let cursor = navigator.run(stdin().lock(), stdout()).await?;
    tracing::debug!("Navigation ended at {}", cursor);

    Ok(())
}
