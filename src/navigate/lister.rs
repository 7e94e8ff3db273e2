//! Directory listing of remote paths

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::process::ProcessRunner;
use crate::rclone::{remote_address, Rclone};

/// Capability to list the immediate sub-directories of a remote path
#[async_trait]
pub trait RemoteLister: Send {
    /// Child directory names of `cursor` on `remote`, in the order the
    /// backend reports them. "No entries" is an empty vector, not an error.
    async fn list_dirs(&mut self, cursor: &str, remote: &str) -> Result<Vec<String>>;
}

/// Lists directories with `rclone lsf --dirs-only`
pub struct RcloneLister<R: ProcessRunner> {
    rclone: Rclone<R>,
}

impl<R: ProcessRunner> RcloneLister<R> {
    pub fn new(rclone: Rclone<R>) -> Self {
        Self { rclone }
    }

}

#[cfg(test)]
impl<R: ProcessRunner> RcloneLister<R> {
    pub fn rclone(&self) -> &Rclone<R> {
        &self.rclone
    }
}

#[async_trait]
impl<R: ProcessRunner> RemoteLister for RcloneLister<R> {
    async fn list_dirs(&mut self, cursor: &str, remote: &str) -> Result<Vec<String>> {
        let address = remote_address(remote, cursor);

        // Spawn failures (rclone missing, not executable) propagate from here
        let output = self.rclone.lsf_dirs(&address).await?;

        if !output.success() {
            tracing::debug!(
                "Listing {} failed ({:?}), treating as empty: {}",
                address,
                output.code,
                output.stderr.trim()
            );
            return Ok(Vec::new());
        }

        Ok(parse_listing(&output.stdout))
    }
}

/// One name per line, trailing separators and whitespace stripped.
/// `.` and `..` are never offered since the cursor cannot descend into them.
pub fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches(&['/', ' ', '\r', '\n'][..]))
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .collect()
}

/// Memoizes listings per (cursor, remote) for the lifetime of a session
pub struct CachedLister<L: RemoteLister> {
    inner: L,
    memo: HashMap<(String, String), Vec<String>>,
}

impl<L: RemoteLister> CachedLister<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            memo: HashMap::new(),
        }
    }

    /// Forget every memoized listing
    #[allow(dead_code)] // Sessions are short-lived; the CLI never refreshes
    pub fn clear(&mut self) {
        self.memo.clear();
    }
}

#[cfg(test)]
impl<L: RemoteLister> CachedLister<L> {
    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

#[async_trait]
impl<L: RemoteLister> RemoteLister for CachedLister<L> {
    async fn list_dirs(&mut self, cursor: &str, remote: &str) -> Result<Vec<String>> {
        let key = (cursor.to_string(), remote.to_string());
        if let Some(hit) = self.memo.get(&key) {
            return Ok(hit.clone());
        }

        // Errors are not memoized
        let listing = self.inner.list_dirs(cursor, remote).await?;
        self.memo.insert(key, listing.clone());
        Ok(listing)
    }
}
