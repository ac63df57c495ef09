//! Stylesheet build step
//!
//! The stylesheet is produced by an external compiler; the pipeline only
//! sees the [`StylesheetBuilder`] interface and stores the finished CSS in
//! the site data.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tera::Context;

use crate::config::StylesheetConfig;
use crate::error::{BuildError, IoResultExt, Result};
use crate::site::Site;
use crate::templates::TemplateRenderer;

/// Produces the finished stylesheet for a build
pub trait StylesheetBuilder {
    fn build(&self, site: &Site, templates: &TemplateRenderer) -> Result<String>;
}

/// A stylesheet known up front
#[derive(Debug, Clone, Default)]
pub struct StaticStylesheet(pub String);

impl StylesheetBuilder for StaticStylesheet {
    fn build(&self, _site: &Site, _templates: &TemplateRenderer) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Compiles the user stylesheet with an external Sass compiler.
///
/// When the wrapper template exists it is rendered with `user_style` (the
/// user stylesheet's text) into a scratch directory and compiled instead,
/// so the user styles can be layered over a framework on the load path.
#[derive(Debug, Clone)]
pub struct SassCommand {
    config: StylesheetConfig,
    base_dir: PathBuf,
}

impl SassCommand {
    pub fn new<P: AsRef<Path>>(config: StylesheetConfig, base_dir: P) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn tool_error(&self, message: impl Into<String>) -> BuildError {
        BuildError::ExternalTool {
            tool: self.config.command.clone(),
            message: message.into(),
        }
    }

    fn compile(&self, entry: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args);
        for load_path in &self.config.load_paths {
            cmd.arg(format!(
                "--load-path={}",
                self.base_dir.join(load_path).display()
            ));
        }
        cmd.arg(entry).arg(output).current_dir(&self.base_dir);

        tracing::debug!("Running {:?}", cmd);
        let out = cmd
            .output()
            .map_err(|e| self.tool_error(format!("failed to run: {e}")))?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(self.tool_error(format!("{}: {}", out.status, stderr.trim())));
        }
        Ok(())
    }
}

impl StylesheetBuilder for SassCommand {
    fn build(&self, site: &Site, templates: &TemplateRenderer) -> Result<String> {
        let input = self.base_dir.join(&self.config.input);
        let user_style = if input.is_file() {
            Some(fs::read_to_string(&input).at(&input)?)
        } else {
            tracing::warn!("User stylesheet not found: {:?}", input);
            None
        };

        let scratch = tempfile::TempDir::new().map_err(|e| self.tool_error(e.to_string()))?;
        let output = scratch.path().join("style.css");

        let entry = if templates.has_template(&self.config.template) {
            let mut context = Context::new();
            context.insert("user_style", user_style.as_deref().unwrap_or(""));
            context.insert("site", site);
            let wrapped = templates.render(&self.config.template, &context)?;

            let entry = scratch.path().join("custom.scss");
            fs::write(&entry, wrapped).at(&entry)?;
            entry
        } else if user_style.is_some() {
            input
        } else {
            tracing::warn!("Nothing to compile, using an empty stylesheet");
            return Ok(String::new());
        };

        self.compile(&entry, &output)?;
        fs::read_to_string(&output).map_err(|e| self.tool_error(format!("no output: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn renderer(templates: &[(&str, &str)]) -> TemplateRenderer {
        TemplateRenderer::from_raw(templates, "layout.html").unwrap()
    }

    fn shell(script: &str) -> StylesheetConfig {
        StylesheetConfig {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_static_stylesheet() {
        let css = StaticStylesheet("a{}".to_string())
            .build(&Site::default(), &renderer(&[]))
            .unwrap();
        assert_eq!(css, "a{}");
    }

    #[cfg(unix)]
    #[test]
    fn test_wrapper_template_is_compiled() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/style.scss"), "a { color: $primary; }\n").unwrap();

        // Stand-in compiler: strip whitespace from $0 into $1
        let builder = SassCommand::new(shell(r#"tr -d ' \n' < "$0" > "$1""#), dir.path());
        let templates = renderer(&[("stylesheet.scss", "$primary: red;\n{{ user_style }}")]);

        let css = builder.build(&Site::default(), &templates).unwrap();
        assert_eq!(css, "$primary:red;a{color:$primary;}");
    }

    #[cfg(unix)]
    #[test]
    fn test_user_stylesheet_without_wrapper() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/style.scss"), "b { x: y }").unwrap();

        let builder = SassCommand::new(shell(r#"cp "$0" "$1""#), dir.path());
        let css = builder.build(&Site::default(), &renderer(&[])).unwrap();
        assert_eq!(css, "b { x: y }");
    }

    #[test]
    fn test_nothing_to_compile() {
        let dir = TempDir::new().unwrap();
        let builder = SassCommand::new(StylesheetConfig::default(), dir.path());
        let css = builder.build(&Site::default(), &renderer(&[])).unwrap();
        assert!(css.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_compiler_failure_is_external_tool_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/style.scss"), "oops {").unwrap();

        let builder = SassCommand::new(shell("echo boom >&2; exit 3"), dir.path());
        match builder.build(&Site::default(), &renderer(&[])).unwrap_err() {
            BuildError::ExternalTool { tool, message } => {
                assert_eq!(tool, "sh");
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_compiler_is_external_tool_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/style.scss"), "a {}").unwrap();

        let config = StylesheetConfig {
            command: "reweb-no-such-sass-binary".to_string(),
            ..Default::default()
        };
        let err = SassCommand::new(config, dir.path())
            .build(&Site::default(), &renderer(&[]))
            .unwrap_err();
        assert!(matches!(err, BuildError::ExternalTool { .. }));
    }
}
