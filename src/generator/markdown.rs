//! Markdown pages: front-matter + Markdown body → one HTML page

use std::fs;
use std::path::Path;

use super::{site_context, write_output, Generator};
use crate::content::Page;
use crate::error::{BuildError, IoResultExt, Result};
use crate::site::Site;

/// Value of `type` in the render context of Markdown-sourced pages
pub const TYPE_TAG: &str = "md";

/// Render `source` and write it to its mapped `.html` path
pub fn generate(gen: &Generator, source: &Path, site: &Site) -> Result<()> {
    let raw = fs::read_to_string(source).at(source)?;
    let page = Page::parse(source, &raw).map_err(|e| BuildError::parse(source, e))?;

    let content = gen.markdown.render(&page.content);

    let mut context = site_context(site);
    context.insert("content", &content);
    context.insert("type", TYPE_TAG);
    context.insert("page", &page);

    let output = gen.wrap(source, &context)?;
    let dest = gen.layout.prepare_output_path(source, None)?;
    write_output(&dest, output.as_bytes())
}
