//! Clean the output directory

use anyhow::{Context, Result};
use std::fs;

use crate::Reweb;

/// Remove `dist/`. Builds never do this on their own.
pub fn run(reweb: &Reweb) -> Result<()> {
    let output_dir = &reweb.layout.output_dir;
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("failed to remove {:?}", output_dir))?;
        tracing::info!("Deleted: {:?}", output_dir);
    }
    Ok(())
}
