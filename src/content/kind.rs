//! Content-type dispatch by file name

use std::path::Path;

/// The generation strategy a source file is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `*.md`: one page, front-matter + Markdown body
    Markdown,
    /// `*.html`: one page, body passed through verbatim
    Html,
    /// `_*.json`: pattern descriptor, one page per data record
    Pattern,
    /// Anything else aborts the build
    Unsupported,
}

impl ContentKind {
    /// Classify a file by its name. Checks run in order, so `_x.md` is
    /// still Markdown.
    pub fn classify(file_name: &str) -> Self {
        if file_name.ends_with(".md") {
            Self::Markdown
        } else if file_name.ends_with(".html") {
            Self::Html
        } else if file_name.starts_with('_') && file_name.ends_with(".json") {
            Self::Pattern
        } else {
            Self::Unsupported
        }
    }

    /// Classify by the final component of `path`
    pub fn of_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(Self::classify)
            .unwrap_or(Self::Unsupported)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Pattern => "pattern",
            Self::Unsupported => "unsupported",
        }
    }
}
