//! Site state: the build-scoped record shared by every generator
//!
//! The site is loaded once per build and mutated in exactly two places:
//! the version step and the stylesheet step (see `commands::build`).
//! Generators only ever see `&Site`.

mod store;
mod version;

pub use store::SiteStore;
pub use version::{InvalidVersion, Version};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key under which the compiled stylesheet is stored in [`Site::data`]
pub const STYLE_KEY: &str = "style";

/// Persisted site descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub name: String,
    pub version: Version,
    /// Open-ended values exposed to templates as `site.data`
    pub data: IndexMap<String, serde_json::Value>,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            name: "site".to_string(),
            version: Version::default(),
            data: IndexMap::new(),
        }
    }
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Compiled stylesheet, if the stylesheet step has run
    pub fn style(&self) -> Option<&str> {
        self.data.get(STYLE_KEY).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site() {
        let yaml = r#"
name: portfolio
version: 1.2.3
data:
  tagline: Hello
  links: [a, b]
"#;
        let site: Site = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(site.name, "portfolio");
        assert_eq!(site.version.to_string(), "1.2.3");
        assert_eq!(site.data["tagline"], serde_json::json!("Hello"));
        assert_eq!(site.style(), None);
    }

    #[test]
    fn test_style_lookup() {
        let mut site = Site::new("x");
        site.data
            .insert(STYLE_KEY.to_string(), serde_json::json!("body{}"));
        assert_eq!(site.style(), Some("body{}"));
    }
}
