//! Static asset copying

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{BuildError, IoResultExt, Result};
use crate::paths::{Layout, STATIC_DIR};

/// Copy `static/` into `dist/static/` and `templates/robots.txt` to
/// `dist/robots.txt`. Missing sources are skipped. Returns the number of
/// files copied.
pub fn copy_static(layout: &Layout) -> Result<usize> {
    let mut copied = 0;

    if layout.static_dir.is_dir() {
        copied += copy_tree(&layout.static_dir, &layout.output_dir.join(STATIC_DIR))?;
    }

    let robots = layout.templates_dir.join("robots.txt");
    if robots.is_file() {
        let dest = layout.output_dir.join("robots.txt");
        fs::create_dir_all(&layout.output_dir).at(&layout.output_dir)?;
        fs::copy(&robots, &dest).at(&dest)?;
        tracing::debug!("Copied: {:?} -> {:?}", robots, dest);
        copied += 1;
    }

    Ok(copied)
}

/// Recursively copy every file of `source_dir` into `dest_dir`,
/// overwriting existing files
pub fn copy_tree(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source_dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source_dir).to_path_buf();
            BuildError::io(&path, e.into())
        })?;
        let path = entry.path();
        let relative = path.strip_prefix(source_dir).unwrap_or(path);
        let dest = dest_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).at(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).at(parent)?;
            }
            fs::copy(path, &dest).at(&dest)?;
            tracing::debug!("Copied: {:?} -> {:?}", path, dest);
            copied += 1;
        }
    }

    Ok(copied)
}
