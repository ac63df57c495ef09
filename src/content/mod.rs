//! Content module - source classification, front-matter and Markdown

mod frontmatter;
mod kind;
mod markdown;
mod page;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use kind::ContentKind;
pub use markdown::MarkdownRenderer;
pub use page::Page;
