//! The navigator's position inside a remote

use std::fmt;

/// Slash-delimited path relative to the remote root. Empty means root.
///
/// Always normalized: no leading or trailing slash, no empty, `.` or `..`
/// segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    segments: Vec<String>,
}

impl Cursor {
    pub fn root() -> Self {
        Self::default()
    }

    /// Normalize a caller-supplied path; `..` pops, `.` and empty segments vanish
    pub fn new(path: &str) -> Self {
        let mut cursor = Self::root();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => cursor.up(),
                name => cursor.segments.push(name.to_string()),
            }
        }
        cursor
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The stored path, e.g. `a/b`, or `""` at root
    pub fn as_path(&self) -> String {
        self.segments.join("/")
    }

    /// `/` at root, `/<path>/` otherwise
    pub fn display_path(&self) -> String {
        if self.is_root() {
            "/".to_string()
        } else {
            format!("/{}/", self.as_path())
        }
    }

    pub fn reset(&mut self) {
        self.segments.clear();
    }

    /// Drop the last segment; no-op at root
    pub fn up(&mut self) {
        self.segments.pop();
    }

    pub fn descend(&mut self, child: &str) {
        self.segments.extend(
            child
                .split('/')
                .filter(|s| !s.is_empty() && *s != "." && *s != "..")
                .map(str::to_string),
        );
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_path())
    }
}
