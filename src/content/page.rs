//! Page model

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::frontmatter::{FrontMatter, FrontMatterError};

/// A single Markdown source: front-matter plus the raw body.
///
/// Serializes as the front-matter keys with the body under `content`,
/// which is what templates see as `page`.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub front_matter: FrontMatter,

    /// Raw markdown body
    pub content: String,

    /// Source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Page {
    /// Split `raw` into front-matter and body
    pub fn parse(source: &Path, raw: &str) -> Result<Self, FrontMatterError> {
        let (front_matter, body) = FrontMatter::parse(raw)?;
        Ok(Self {
            front_matter,
            content: body.to_string(),
            source: source.to_path_buf(),
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.front_matter.title()
    }
}
