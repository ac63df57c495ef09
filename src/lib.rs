//! reweb: a static site builder
//!
//! Turns a `pages/` tree of Markdown files, HTML fragments and JSON pattern
//! descriptors into a `dist/` tree of pages rendered through Tera
//! templates, alongside copied static assets and a compiled stylesheet.

pub mod assets;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod paths;
pub mod site;
pub mod stylesheet;
pub mod templates;

pub use error::{BuildError, Result};

use std::path::Path;

use content::MarkdownRenderer;
use generator::Generator;
use paths::{Layout, CONFIG_FILE};
use site::SiteStore;
use templates::TemplateRenderer;

/// A project on disk and its configuration
#[derive(Debug, Clone)]
pub struct Reweb {
    /// Build configuration
    pub config: config::BuildConfig,
    /// Project directories
    pub layout: Layout,
}

impl Reweb {
    /// Open the project rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let layout = Layout::new(base_dir);
        let config_path = layout.base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BuildConfig::load(&config_path)?
        } else {
            config::BuildConfig::default()
        };

        Ok(Self { config, layout })
    }

    pub fn base_dir(&self) -> &Path {
        &self.layout.base_dir
    }

    pub fn site_store(&self) -> SiteStore {
        SiteStore::new(self.layout.base_dir.join(&self.config.site_file))
    }

    /// Load templates and set up a page generator
    pub fn generator(&self) -> Result<Generator> {
        let renderer = TemplateRenderer::load(&self.layout.templates_dir, &self.config.layout)?;
        let markdown = MarkdownRenderer::with_options(&self.config.highlight);
        Ok(Generator::new(self.layout.clone(), renderer, markdown))
    }

    /// Build the site
    pub fn build(&self) -> Result<commands::build::BuildReport> {
        commands::build::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
