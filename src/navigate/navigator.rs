//! Interactive read-eval-print loop over a [`RemoteLister`]

use std::io::{BufRead, Write};

use crate::error::Result;

use super::cursor::Cursor;
use super::lister::RemoteLister;

const PROMPT: &str = "Select a number (\".\" go to root, \"..\" go up, \"q\" quit) > ";
const OUT_OF_RANGE: &str = "Invalid selection: index out of range.";
const INVALID_INPUT: &str = "Invalid input. Please enter a number, '.', '..', or 'q'.";

/// One line of user input, classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Root,
    Up,
    /// All-digit input. `None` when the number does not even fit a `usize`.
    Index(Option<usize>),
    Invalid,
}

impl Selection {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "q" => Selection::Quit,
            "." => Selection::Root,
            ".." => Selection::Up,
            s if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Selection::Index(s.parse().ok())
            }
            _ => Selection::Invalid,
        }
    }
}

/// A navigation session over one remote
pub struct Navigator<L: RemoteLister> {
    lister: L,
    remote: String,
    cursor: Cursor,
}

impl<L: RemoteLister> Navigator<L> {
    pub fn new(lister: L, remote: impl Into<String>, start: &str) -> Self {
        Self {
            lister,
            remote: remote.into(),
            cursor: Cursor::new(start),
        }
    }

    /// Drive the loop until `q` or end of input, returning the final cursor.
    ///
    /// Lister infrastructure errors and console I/O errors abort the session.
    pub async fn run<I, O>(&mut self, mut input: I, mut output: O) -> Result<Cursor>
    where
        I: BufRead,
        O: Write,
    {
        let mut line = String::new();

        loop {
            writeln!(output, "Current remote path: {}", self.cursor.display_path())?;

            let dirs = self
                .lister
                .list_dirs(&self.cursor.as_path(), &self.remote)
                .await?;

            if dirs.is_empty() {
                writeln!(output, "No sub-directories found.")?;
            } else {
                writeln!(output, "Sub-directories:")?;
                for (idx, dir) in dirs.iter().enumerate() {
                    writeln!(output, "  [{}] {}", idx, dir)?;
                }
            }

            write!(output, "{}", PROMPT)?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                // EOF ends the session like `q`
                writeln!(output)?;
                break;
            }

            match Selection::parse(&line) {
                Selection::Quit => break,
                Selection::Root => self.cursor.reset(),
                Selection::Up => self.cursor.up(),
                Selection::Index(Some(idx)) if idx < dirs.len() => {
                    tracing::debug!("Entering {}", dirs[idx]);
                    self.cursor.descend(&dirs[idx]);
                }
                Selection::Index(_) => writeln!(output, "{}", OUT_OF_RANGE)?,
                Selection::Invalid => writeln!(output, "{}", INVALID_INPUT)?,
            }

            writeln!(output)?;
        }

        writeln!(output, "Final remote path: {}", self.cursor.display_path())?;
        output.flush()?;

        Ok(self.cursor.clone())
    }
}

#[cfg(test)]
impl<L: RemoteLister> Navigator<L> {
    pub fn lister(&self) -> &L {
        &self.lister
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::{Cursor as Input, ErrorKind};

    use async_trait::async_trait;

    use super::*;
    use crate::error::RclonewError;
    use crate::navigate::lister::CachedLister;

    /// Serves fixed listings per path and counts calls
    #[derive(Default)]
    struct MapLister {
        listings: HashMap<String, Vec<String>>,
        fallback: Vec<String>,
        calls: Vec<String>,
    }

    impl MapLister {
        fn everywhere(children: &[&str]) -> Self {
            Self {
                fallback: children.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        fn with(mut self, path: &str, children: &[&str]) -> Self {
            self.listings.insert(
                path.to_string(),
                children.iter().map(|s| s.to_string()).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl RemoteLister for MapLister {
        async fn list_dirs(&mut self, cursor: &str, remote: &str) -> Result<Vec<String>> {
            assert_eq!(remote, "gdrive");
            self.calls.push(cursor.to_string());
            Ok(self
                .listings
                .get(cursor)
                .cloned()
                .unwrap_or_else(|| self.fallback.clone()))
        }
    }

    struct BrokenLister;

    #[async_trait]
    impl RemoteLister for BrokenLister {
        async fn list_dirs(&mut self, _cursor: &str, _remote: &str) -> Result<Vec<String>> {
            Err(RclonewError::spawn(
                "rclone",
                std::io::Error::new(ErrorKind::NotFound, "rclone not found"),
            ))
        }
    }

    async fn session<L: RemoteLister>(
        lister: L,
        start: &str,
        input: &str,
    ) -> (Navigator<L>, Cursor, Vec<String>) {
        let mut navigator = Navigator::new(lister, "gdrive", start);
        let mut out = Vec::new();
        let cursor = navigator
            .run(Input::new(input.as_bytes()), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        // Without a terminal echoing the user's Enter, the next message
        // lands on the prompt line
        let lines = text
            .lines()
            .map(|l| l.strip_prefix(PROMPT).unwrap_or(l).to_string())
            .collect();
        (navigator, cursor, lines)
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("q\n"), Selection::Quit);
        assert_eq!(Selection::parse(" . "), Selection::Root);
        assert_eq!(Selection::parse(".."), Selection::Up);
        assert_eq!(Selection::parse("7"), Selection::Index(Some(7)));
        assert_eq!(
            Selection::parse("99999999999999999999999999"),
            Selection::Index(None)
        );
        assert_eq!(Selection::parse("-1"), Selection::Invalid);
        assert_eq!(Selection::parse("+1"), Selection::Invalid);
        assert_eq!(Selection::parse(""), Selection::Invalid);
        assert_eq!(Selection::parse("Q"), Selection::Invalid);
        assert_eq!(Selection::parse("invalid"), Selection::Invalid);
    }

    #[tokio::test]
    async fn test_navigate_down_and_up() {
        let lister = MapLister::default().with("", &["folder1", "folder2"]);
        let (nav, cursor, lines) = session(lister, "", "0\n..\nq\n").await;

        assert!(cursor.is_root());
        assert_eq!(lines.first().unwrap(), "Current remote path: /");
        assert!(lines.contains(&"Sub-directories:".to_string()));
        assert!(lines.contains(&"  [0] folder1".to_string()));
        assert!(lines.contains(&"  [1] folder2".to_string()));
        assert!(lines.contains(&"Current remote path: /folder1/".to_string()));
        assert_eq!(lines.last().unwrap(), "Final remote path: /");
        assert_eq!(nav.lister().calls, vec!["", "folder1", ""]);
    }

    #[tokio::test]
    async fn test_select_each_valid_index() {
        let children = ["a", "b c", "d"];
        for (idx, child) in children.iter().enumerate() {
            let lister = MapLister::everywhere(&children);
            let (_, cursor, _) = session(lister, "parent", &format!("{}\nq\n", idx)).await;
            assert_eq!(cursor.as_path(), format!("parent/{}", child));

            let lister = MapLister::everywhere(&children);
            let (_, cursor, _) = session(lister, "", &format!("{}\nq\n", idx)).await;
            assert_eq!(cursor.as_path(), *child);
        }
    }

    #[tokio::test]
    async fn test_navigate_no_subdirs() {
        let (_, _, lines) = session(MapLister::default(), "", "q\n").await;
        assert!(lines.contains(&"No sub-directories found.".to_string()));
        assert!(!lines.contains(&"Sub-directories:".to_string()));
    }

    #[tokio::test]
    async fn test_navigate_root_from_nested_start() {
        let (_, cursor, lines) =
            session(MapLister::everywhere(&["subdir"]), "some/path", ".\nq\n").await;
        assert!(cursor.is_root());
        assert_eq!(lines[0], "Current remote path: /some/path/");
        assert_eq!(lines.last().unwrap(), "Final remote path: /");
    }

    #[tokio::test]
    async fn test_up_at_root_is_noop() {
        let (_, cursor, _) = session(MapLister::everywhere(&["subdir"]), "", "..\nq\n").await;
        assert!(cursor.is_root());
    }

    #[tokio::test]
    async fn test_up_from_nested() {
        let (_, cursor, lines) = session(MapLister::everywhere(&[]), "a/b", "..\nq\n").await;
        assert_eq!(cursor.as_path(), "a");
        assert_eq!(lines.last().unwrap(), "Final remote path: /a/");
    }

    #[tokio::test]
    async fn test_index_out_of_range() {
        let (nav, cursor, lines) =
            session(MapLister::everywhere(&["subdir"]), "", "10\nq\n").await;
        assert!(cursor.is_root());
        assert!(lines.contains(&"Invalid selection: index out of range.".to_string()));
        // Re-listed at the same position on the next iteration
        assert_eq!(nav.lister().calls, vec!["", ""]);
        assert_eq!(
            lines.iter().filter(|l| *l == "  [0] subdir").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_huge_index_is_out_of_range() {
        let (_, _, lines) = session(
            MapLister::everywhere(&["subdir"]),
            "",
            "123456789012345678901234567890\nq\n",
        )
        .await;
        assert!(lines.contains(&"Invalid selection: index out of range.".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let (_, cursor, lines) =
            session(MapLister::everywhere(&["subdir"]), "", "invalid\nq\n").await;
        assert!(cursor.is_root());
        assert!(lines
            .contains(&"Invalid input. Please enter a number, '.', '..', or 'q'.".to_string()));
    }

    #[tokio::test]
    async fn test_prompt_text() {
        let mut navigator = Navigator::new(MapLister::default(), "gdrive", "");
        let mut out = Vec::new();
        navigator.run(Input::new("q\n".as_bytes()), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(
            "Select a number (\".\" go to root, \"..\" go up, \"q\" quit) > "
        ));
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let (_, cursor, lines) = session(MapLister::everywhere(&["x"]), "", "0\n").await;
        assert_eq!(cursor.as_path(), "x");
        assert_eq!(lines.last().unwrap(), "Final remote path: /x/");
    }

    #[tokio::test]
    async fn test_lister_error_aborts() {
        let mut navigator = Navigator::new(BrokenLister, "gdrive", "");
        let mut out = Vec::new();
        let err = navigator
            .run(Input::new("q\n".as_bytes()), &mut out)
            .await
            .unwrap_err();
        assert!(err.is_spawn());
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Final remote path"));
    }

    #[tokio::test]
    async fn test_session_memoizes_revisits() {
        let lister = CachedLister::new(MapLister::default().with("", &["folder1"]));
        let (nav, _, _) = session(lister, "", "0\n..\n0\nq\n").await;
        // "", "folder1", "" (cached), "folder1" (cached)
        assert_eq!(nav.lister().inner().calls, vec!["", "folder1"]);
    }
}
