//! Error types for configuration loading and validation.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading, parsing, or validating a configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or type error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number, when the parser reported one.
        line: Option<usize>,
        /// 1-based column number, when the parser reported one.
        col: Option<usize>,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: Option<String>,
    },
    #[error("{message}")]
    /// The file parsed but describes an unusable configuration.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Build a parse error from a RON message, extracting a leading
    /// `line:col` position when present.
    pub(crate) fn parse(path: Option<&Path>, source: &str, message: String) -> Self {
        let (line, col) = match leading_position(&message) {
            Some((l, c)) => (Some(l), Some(c)),
            None => (None, None),
        };
        let excerpt = line.map(|l| excerpt_at(source, l, col.unwrap_or(1)));
        Self::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message,
            excerpt,
        }
    }

    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => {
                let loc = match (line, col) {
                    (Some(l), Some(c)) => format!("{}:{}", l, c),
                    (Some(l), None) => format!("{}", l),
                    _ => String::new(),
                };
                let head = match (path, loc.is_empty()) {
                    (Some(p), false) => format!("Config parse error at {}:{}", p.display(), loc),
                    (Some(p), true) => format!("Config parse error in {}", p.display()),
                    (None, false) => format!("Config parse error at {}", loc),
                    (None, true) => "Config parse error".to_string(),
                };
                match excerpt {
                    Some(ex) => format!("{}\n{}\n{}", head, message, ex),
                    None => format!("{}\n{}", head, message),
                }
            }
            Self::Validation { path, message } => match path {
                Some(p) => format!("Config validation error in {}\n{}", p.display(), message),
                None => format!("Config validation error\n{}", message),
            },
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `path` to an error that has none.
    pub(crate) fn with_path(mut self, p: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                if path.is_none() {
                    *path = Some(p.to_path_buf());
                }
            }
        }
        self
    }
}

/// Parse a `line:col` prefix such as `3:14: Expected ...` or the start of a
/// span such as `3:14-3:20: ...`.
fn leading_position(message: &str) -> Option<(usize, usize)> {
    let mut parts = message.splitn(3, ':');
    let line = parts.next()?.trim().parse().ok()?;
    let rest = parts.next()?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let col = digits.parse().ok()?;
    Some((line, col))
}

/// Build a small 2–3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_extracted() {
        assert_eq!(leading_position("3:14: Expected comma"), Some((3, 14)));
        assert_eq!(leading_position("3:14-3:20: Expected comma"), Some((3, 14)));
        assert_eq!(leading_position("Expected comma"), None);
    }

    #[test]
    fn excerpt_points_at_column() {
        let src = "(\n  hints: (\n    characters: 1,\n  ),\n)";
        let ex = excerpt_at(src, 3, 17);
        assert!(ex.contains("    3 |     characters: 1,"));
        let caret = ex.lines().find(|l| l.trim_end().ends_with('^')).unwrap();
        assert_eq!(caret.find('^'), Some(8 + 16));
    }

    #[test]
    fn pretty_includes_location() {
        let e = Error::parse(Some(Path::new("/tmp/c.ron")), "(\nx\n)", "2:1: Unexpected".into());
        let p = e.pretty();
        assert!(p.starts_with("Config parse error at /tmp/c.ron:2:1"));
        assert!(p.contains("Unexpected"));
    }
}
