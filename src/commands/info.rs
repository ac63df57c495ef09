//! Show site information

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::ContentKind;
use crate::Reweb;

/// Source file counts per content kind
pub fn count_sources(reweb: &Reweb) -> Result<BTreeMap<&'static str, usize>> {
    let generator = reweb.generator()?;
    let mut counts = BTreeMap::new();
    for path in generator.source_files()? {
        *counts.entry(ContentKind::of_path(&path).as_str()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Print the site name, version and source counts
pub fn run(reweb: &Reweb) -> Result<()> {
    let site = reweb.site_store().load()?;
    println!("{} (version {})", site.name, site.version);

    let counts = count_sources(reweb)?;
    println!("Sources ({}):", counts.values().sum::<usize>());
    for (kind, count) in &counts {
        println!("  {} {}", kind, count);
    }
    if counts.contains_key(ContentKind::Unsupported.as_str()) {
        tracing::warn!("Unsupported sources present; a build will fail");
    }

    Ok(())
}
