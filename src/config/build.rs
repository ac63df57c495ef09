//! Build configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, IoResultExt, Result};

/// Main build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Template used as the default content wrapper
    pub layout: String,
    /// Site metadata store, relative to the project root
    pub site_file: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub stylesheet: StylesheetConfig,
    #[serde(default)]
    pub build: PassConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            layout: "layout.html".to_string(),
            site_file: "site.yml".to_string(),
            highlight: HighlightConfig::default(),
            stylesheet: StylesheetConfig::default(),
            build: PassConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).at(path)?;
        serde_yaml::from_str(&content).map_err(|e| BuildError::parse(path, e))
    }
}

/// Fenced code highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// External stylesheet compiler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    pub enable: bool,
    pub command: String,
    pub args: Vec<String>,
    /// User stylesheet, relative to the project root
    pub input: String,
    /// Wrapper template rendered with `user_style`, if present in templates/
    pub template: String,
    pub load_paths: Vec<String>,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: "sass".to_string(),
            args: vec![
                "--no-source-map".to_string(),
                "--style=compressed".to_string(),
            ],
            input: "assets/style.scss".to_string(),
            template: "stylesheet.scss".to_string(),
            load_paths: Vec::new(),
        }
    }
}

/// Page generation pass settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Build the stylesheet before generating pages and run a single pass
    pub single_pass: bool,
}
