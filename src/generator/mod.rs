//! Generator module - walks the content tree and renders every page
//!
//! Each source file is classified by [`ContentKind`] and handed to one of
//! three strategies:
//!
//! - [`markdown`]: front-matter + Markdown → one page
//! - [`html`]: raw HTML body → one page
//! - [`pattern`]: JSON descriptor + data array → one page per record

pub mod html;
pub mod markdown;
pub mod pattern;

use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{ContentKind, MarkdownRenderer};
use crate::error::{BuildError, IoResultExt, Result};
use crate::paths::Layout;
use crate::site::Site;
use crate::templates::TemplateRenderer;

/// Renders the content tree into the output tree
pub struct Generator {
    layout: Layout,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

/// Counts of what one pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub markdown: usize,
    pub html: usize,
    pub patterns: usize,
    /// Pages written by all pattern descriptors together
    pub pattern_pages: usize,
}

impl PassStats {
    pub fn pages(&self) -> usize {
        self.markdown + self.html + self.pattern_pages
    }
}

impl Generator {
    pub fn new(layout: Layout, renderer: TemplateRenderer, markdown: MarkdownRenderer) -> Self {
        Self {
            layout,
            renderer,
            markdown,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Generate every page under the content root.
    ///
    /// The first failing file aborts the pass; pages written before it stay
    /// on disk.
    pub fn generate_pages(&self, site: &Site) -> Result<PassStats> {
        let mut stats = PassStats::default();

        for path in self.source_files()? {
            match ContentKind::of_path(&path) {
                ContentKind::Markdown => {
                    markdown::generate(self, &path, site)?;
                    stats.markdown += 1;
                }
                ContentKind::Html => {
                    html::generate(self, &path, site)?;
                    stats.html += 1;
                }
                ContentKind::Pattern => {
                    stats.pattern_pages += pattern::generate(self, &path, site)?;
                    stats.patterns += 1;
                }
                ContentKind::Unsupported => {
                    return Err(BuildError::UnsupportedContent { path });
                }
            }
        }

        Ok(stats)
    }

    /// Every file under the content root, sorted by name within each
    /// directory so repeated runs visit them in the same order
    pub fn source_files(&self) -> Result<Vec<std::path::PathBuf>> {
        let content_dir = &self.layout.content_dir;
        if !content_dir.is_dir() {
            tracing::warn!("Content directory not found: {:?}", content_dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(content_dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(content_dir).to_path_buf();
                BuildError::io(&path, e.into())
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Wrap already rendered `content` in the default layout
    fn wrap(&self, page: &Path, context: &Context) -> Result<String> {
        self.renderer.render_layout(context).map_err(|e| retag(page, e))
    }
}

/// Report template failures against the page being rendered
fn retag(page: &Path, err: BuildError) -> BuildError {
    match err {
        BuildError::Template { source, .. } => BuildError::template(page, source),
        other => other,
    }
}

/// Context shared by every render: the site record
fn site_context(site: &Site) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context
}

/// Write `bytes` to `dest`, replacing any previous file
fn write_output(dest: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(dest, bytes).at(dest)?;
    tracing::debug!("Generated: {:?}", dest);
    Ok(())
}
