//! Pattern pages: one descriptor, one page per record of a JSON array
//!
//! A descriptor `pages/<dir>/_<name>.json` looks like
//!
//! ```json
//! { "source": "data/people.json", "template": "person.html", "basepath_attr": "id" }
//! ```
//!
//! and produces `dist/<dir>/<record.id>.html` for every record, rendering
//! `person.html` with the record bound to `<name>`.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tera::Context;

use super::{retag, site_context, write_output, Generator};
use crate::error::{BuildError, IoResultExt, Result};
use crate::site::Site;

/// A validated pattern descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDescriptor {
    /// Data array, relative to the project root
    pub source: String,
    /// Template rendered once per record
    pub template: String,
    /// Record field whose value becomes the output file stem
    pub basepath_attr: String,
}

#[derive(Deserialize)]
struct RawDescriptor {
    source: Option<String>,
    template: Option<String>,
    basepath_attr: Option<String>,
}

impl PatternDescriptor {
    /// Read and validate the descriptor at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).at(path)?;
        let raw: RawDescriptor =
            serde_json::from_str(&raw).map_err(|e| BuildError::parse(path, e))?;

        let require = |value: Option<String>, field: &str| {
            value.ok_or_else(|| BuildError::missing_field(path, field))
        };

        Ok(Self {
            source: require(raw.source, "source")?,
            template: require(raw.template, "template")?,
            basepath_attr: require(raw.basepath_attr, "basepath_attr")?,
        })
    }
}

/// Name the records are bound to: `_members.json` → `members`
pub fn binding_name(descriptor: &Path) -> String {
    descriptor
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.strip_prefix('_').unwrap_or(n))
        .and_then(|n| n.split('.').next())
        .unwrap_or_default()
        .to_string()
}

/// Generate every page of the descriptor at `source`; returns the number
/// of pages written
pub fn generate(gen: &Generator, source: &Path, site: &Site) -> Result<usize> {
    let descriptor = PatternDescriptor::load(source)?;
    let name = binding_name(source);
    let data_path = gen.layout.base_dir.join(&descriptor.source);
    let records = load_records(&data_path)?;

    let mut seen = HashSet::new();
    for record in &records {
        let stem = record_stem(record, &descriptor.basepath_attr, &data_path)?;
        if !seen.insert(stem.clone()) {
            tracing::debug!(
                "Duplicate `{}` value {:?} in {:?}, later record wins",
                descriptor.basepath_attr,
                stem,
                data_path
            );
        }

        // `site` is inserted last so a record bound to `site` cannot shadow it
        let mut context = Context::new();
        context.insert(name.as_str(), record);
        context.insert("site", site);
        let content = gen
            .renderer
            .render(&descriptor.template, &context)
            .map_err(|e| retag(source, e))?;

        let mut context = site_context(site);
        context.insert("content", &content);
        let output = gen.wrap(source, &context)?;

        let filename = format!("{stem}.html");
        let dest = gen.layout.prepare_output_path(source, Some(&filename))?;
        write_output(&dest, output.as_bytes())?;
    }

    tracing::debug!(
        "Pattern {:?} produced {} pages from {:?}",
        source,
        records.len(),
        data_path
    );
    Ok(records.len())
}

fn load_records(path: &Path) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(path).at(path)?;
    serde_json::from_str(&raw).map_err(|e| BuildError::parse(path, e))
}

/// Output file stem of one record. Strings are used as-is, numbers in
/// their JSON form; the result must be a plain file name.
fn record_stem(record: &Value, attr: &str, data_path: &Path) -> Result<String> {
    let value = record
        .get(attr)
        .ok_or_else(|| BuildError::missing_field(data_path, attr))?;

    let stem = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(BuildError::UnsafeFilename {
                path: data_path.to_path_buf(),
                stem: other.to_string(),
            })
        }
    };

    let unsafe_stem = stem.is_empty()
        || stem == "."
        || stem == ".."
        || stem.contains(['/', '\\', '\0']);
    if unsafe_stem {
        return Err(BuildError::UnsafeFilename {
            path: data_path.to_path_buf(),
            stem,
        });
    }

    Ok(stem)
}
