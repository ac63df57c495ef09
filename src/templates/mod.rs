//! Template layer backed by the Tera engine
//!
//! Templates are read from the project's `templates/` directory and named
//! by their path relative to it (`layout.html`, `partials/card.html`).
//! One of them, the layout, is the default content wrapper every page goes
//! through.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::error::{BuildError, IoResultExt, Result};

/// Template renderer with the project's templates loaded
pub struct TemplateRenderer {
    tera: Tera,
    layout: String,
    templates_dir: PathBuf,
}

impl TemplateRenderer {
    /// Load every file under `templates_dir` and use `layout` as the
    /// default wrapper
    pub fn load<P: AsRef<Path>>(templates_dir: P, layout: &str) -> Result<Self> {
        let templates_dir = templates_dir.as_ref().to_path_buf();
        let mut templates = Vec::new();

        if templates_dir.is_dir() {
            for entry in WalkDir::new(&templates_dir).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(&templates_dir).to_path_buf();
                    BuildError::io(&path, e.into())
                })?;
                if !entry.file_type().is_file() || is_hidden(entry.path()) {
                    continue;
                }
                let bytes = fs::read(entry.path()).at(entry.path())?;
                let Ok(source) = String::from_utf8(bytes) else {
                    tracing::warn!("Skipping non-UTF-8 file in templates: {:?}", entry.path());
                    continue;
                };
                templates.push((template_name(&templates_dir, entry.path()), source));
            }
        } else {
            tracing::warn!("Templates directory not found: {:?}", templates_dir);
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| BuildError::TemplateLoad {
                path: templates_dir.clone(),
                source: e,
            })?;

        tracing::debug!("Loaded {} templates", tera.get_template_names().count());
        Ok(Self::from_tera(tera, layout, templates_dir))
    }

    /// Build a renderer from in-memory templates
    pub fn from_raw(templates: &[(&str, &str)], layout: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.to_vec())
            .map_err(|e| BuildError::TemplateLoad {
                path: PathBuf::from("<raw>"),
                source: e,
            })?;
        Ok(Self::from_tera(tera, layout, PathBuf::from("<raw>")))
    }

    fn from_tera(mut tera: Tera, layout: &str, templates_dir: PathBuf) -> Self {
        // Pages are HTML we produced ourselves; nothing to escape
        tera.autoescape_on(vec![]);

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Self {
            tera,
            layout: layout.to_string(),
            templates_dir,
        }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a named template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .map_err(|e| BuildError::template(self.templates_dir.join(template_name), e))
    }

    /// Render the default content wrapper
    pub fn render_layout(&self, context: &Context) -> Result<String> {
        self.render(&self.layout, context)
    }
}

/// Dotfiles such as `.DS_Store` are never templates
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// `dir/sub/name.html` under the templates root → `sub/name.html`
fn template_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " .....".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}
