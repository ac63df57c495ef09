//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a front-matter header could not be read
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unterminated {0} front-matter block")]
    Unterminated(&'static str),
}

/// Front-matter fields of a page, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    pub fields: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.fields.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start();
        let first_line = trimmed.lines().next().unwrap_or_default().trim_end();

        // YAML front-matter (---)
        if first_line == "---" {
            return Self::parse_yaml(content, trimmed);
        }

        // TOML front-matter (+++)
        if let Some(rest) = trimmed.strip_prefix("+++") {
            return Self::parse_toml(rest);
        }

        // JSON front-matter (;;; or a lone `{` line)
        if trimmed.starts_with(";;;") || first_line == "{" {
            return Self::parse_json(trimmed);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(
        original: &'a str,
        content: &'a str,
    ) -> Result<(Self, &'a str), FrontMatterError> {
        let rest = content.split_once('\n').map_or("", |(_, rest)| rest);

        // `---` followed by a blank line is a thematic break, not a header
        if rest.lines().next().map_or(true, |line| line.trim().is_empty()) {
            return Ok((FrontMatter::default(), original));
        }

        let (yaml_content, remaining) = match rest.strip_prefix("---") {
            Some(after) => ("", after),
            None => match rest.find("\n---") {
                Some(end_pos) => (&rest[..end_pos], &rest[end_pos + 4..]),
                // A lone `---` is a thematic break, not a header
                None => return Ok((FrontMatter::default(), original)),
            },
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fields = serde_yaml::from_str(yaml_content)?;
        Ok((Self { fields }, remaining))
    }

    fn parse_toml(rest: &str) -> Result<(Self, &str), FrontMatterError> {
        let end_pos = rest.find("\n+++").ok_or(FrontMatterError::Unterminated("TOML"))?;
        let fields = toml::from_str(&rest[..end_pos])?;
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);
        Ok((Self { fields }, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated("JSON"))?;
            let fields = serde_json::from_str(&rest[..end_pos])?;
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
            return Ok((Self { fields }, remaining));
        }

        // A JSON object at the start, up to its matching closing brace
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let fields = serde_json::from_str(&content[..=i])?;
                        let remaining = content[i + 1..].trim_start_matches(['\n', '\r']);
                        return Ok((Self { fields }, remaining));
                    }
                }
                _ => {}
            }
        }

        Err(FrontMatterError::Unterminated("JSON"))
    }
}
