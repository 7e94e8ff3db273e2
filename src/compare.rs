//! Checksum comparison of two trees with `rclone check`

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::process::{ProcessOutput, ProcessRunner};
use crate::rclone::Rclone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Identical,
    /// Trees differ; rclone's output was saved to `report`
    Differences { report: PathBuf },
}

/// `<dir>/<YYYYMMDDTHHMMSS>_comparison.txt`
pub fn report_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}_comparison.txt", at.format("%Y%m%dT%H%M%S")))
}

pub fn render_report(first: &str, second: &str, output: &ProcessOutput) -> String {
    format!(
        "Differences detected between folders:\n\
         Folder 1: {}\n\
         Folder 2: {}\n\
         STDOUT:\n\
         {}\n\
         STDERR:\n\
         {}",
        first, second, output.stdout, output.stderr
    )
}

/// Compare two folders (local or `remote:path`) by checksum.
///
/// Any non-zero exit from `rclone check` counts as "differences found" and
/// its output is written to a timestamped report under `report_dir`.
pub async fn compare_folders<R: ProcessRunner>(
    rclone: &Rclone<R>,
    first: &str,
    second: &str,
    report_dir: &Path,
) -> Result<Comparison> {
    let output = rclone.check(first, second).await.map_err(|e| {
        tracing::error!("Error comparing folders '{}' and '{}': {}", first, second, e);
        e
    })?;

    if output.success() {
        tracing::info!("Folders '{}' and '{}' are identical.", first, second);
        return Ok(Comparison::Identical);
    }

    tracing::info!("Differences detected between folders '{}' and '{}'.", first, second);

    let report = report_path(report_dir, Local::now());
    write_report(&report, &render_report(first, second, &output))
        .await
        .map_err(|e| {
            tracing::error!("Error writing comparison report '{}': {}", report.display(), e);
            e
        })?;

    tracing::info!("Differences stored in '{}'.", report.display());
    Ok(Comparison::Differences { report })
}

async fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
