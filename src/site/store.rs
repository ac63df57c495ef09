//! Site metadata store backed by a YAML file

use std::fs;
use std::path::{Path, PathBuf};

use super::Site;
use crate::error::{BuildError, IoResultExt, Result};

/// Reads and writes the persisted [`Site`] descriptor
#[derive(Debug, Clone)]
pub struct SiteStore {
    path: PathBuf,
}

impl SiteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the site, falling back to a default one named after the
    /// project directory when no store exists yet
    pub fn load(&self) -> Result<Site> {
        if !self.path.exists() {
            let name = self
                .path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or("site");
            tracing::warn!("No site store at {:?}, starting from defaults", self.path);
            return Ok(Site::new(name));
        }

        let content = fs::read_to_string(&self.path).at(&self.path)?;
        serde_yaml::from_str(&content).map_err(|e| BuildError::parse(&self.path, e))
    }

    /// Persist the site, replacing the previous descriptor
    pub fn store(&self, site: &Site) -> Result<()> {
        let content = serde_yaml::to_string(site).map_err(|e| BuildError::parse(&self.path, e))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::write(&self.path, content).at(&self.path)?;
        tracing::debug!("Stored site state in {:?}", self.path);
        Ok(())
    }
}
