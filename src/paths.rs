//! Project layout and the source → output path mapping

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoResultExt, Result};

pub const CONTENT_DIR: &str = "pages";
pub const OUTPUT_DIR: &str = "dist";
pub const STATIC_DIR: &str = "static";
pub const TEMPLATES_DIR: &str = "templates";
pub const CONFIG_FILE: &str = "_config.yml";

/// Fixed directory convention of a project, rooted at `base_dir`
#[derive(Debug, Clone)]
pub struct Layout {
    pub base_dir: PathBuf,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl Layout {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            content_dir: base_dir.join(CONTENT_DIR),
            output_dir: base_dir.join(OUTPUT_DIR),
            static_dir: base_dir.join(STATIC_DIR),
            templates_dir: base_dir.join(TEMPLATES_DIR),
            base_dir,
        }
    }

    /// Map a source file under the content root to its output path.
    ///
    /// A trailing `.md` becomes `.html`; every other extension is kept.
    /// With `filename`, the computed file name is replaced and only the
    /// relative directory of `source` is kept.
    pub fn output_path(&self, source: &Path, filename: Option<&str>) -> Result<PathBuf> {
        let relative = source
            .strip_prefix(&self.content_dir)
            .map_err(|_| BuildError::Path {
                path: source.to_path_buf(),
                root: self.content_dir.clone(),
            })?;

        let mapped = match filename {
            Some(name) => match relative.parent() {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            },
            None => match relative.file_name().and_then(|n| n.to_str()) {
                // Suffix check rather than `extension()`, which is empty for `.md`
                Some(name) if name.ends_with(".md") => {
                    relative.with_file_name(format!("{}.html", &name[..name.len() - 3]))
                }
                _ => relative.to_path_buf(),
            },
        };

        Ok(self.output_dir.join(mapped))
    }

    /// Same as [`Layout::output_path`], additionally creating every
    /// missing ancestor directory of the destination
    pub fn prepare_output_path(&self, source: &Path, filename: Option<&str>) -> Result<PathBuf> {
        let dest = self.output_path(source, filename)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        Ok(dest)
    }
}
