//! Initialize a new project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::paths::{CONFIG_FILE, CONTENT_DIR, STATIC_DIR, TEMPLATES_DIR};
use crate::site::{Site, SiteStore};

const CONFIG: &str = r#"# reweb configuration

# Template wrapping every page
layout: layout.html
# Site name, version and template data
site_file: site.yml

highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

stylesheet:
  enable: true
  command: sass
  args: ["--no-source-map", "--style=compressed"]
  input: assets/style.scss
  template: stylesheet.scss
  load_paths: []

build:
  single_pass: false
"#;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{% if page is defined and page.title %}{{ page.title }} | {% endif %}{{ site.name }}</title>
  {% if site.data.style is defined %}<style>{{ site.data.style }}</style>{% endif %}
</head>
<body>
{{ content }}
</body>
</html>
"#;

const STYLESHEET: &str = r#"// Framework imports go here (see stylesheet.load_paths)
{{ user_style }}
"#;

const USER_STYLE: &str = r#"body {
  font-family: system-ui, sans-serif;
}
"#;

const INDEX: &str = r#"---
title: Home
---

# Welcome

Edit `pages/index.md` and run `reweb build`.
"#;

/// Initialize a new project in the given directory. Existing files are
/// left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    for dir in [CONTENT_DIR, TEMPLATES_DIR, STATIC_DIR, "assets"] {
        let path = target_dir.join(dir);
        fs::create_dir_all(&path).with_context(|| format!("failed to create {:?}", path))?;
    }

    let files = [
        (CONFIG_FILE, CONFIG),
        ("templates/layout.html", LAYOUT),
        ("templates/stylesheet.scss", STYLESHEET),
        ("assets/style.scss", USER_STYLE),
        ("pages/index.md", INDEX),
    ];
    for (name, content) in files {
        let path = target_dir.join(name);
        if path.exists() {
            tracing::debug!("Keeping existing {:?}", path);
            continue;
        }
        fs::write(&path, content).with_context(|| format!("failed to write {:?}", path))?;
    }

    let store = SiteStore::new(target_dir.join("site.yml"));
    if !store.path().exists() {
        let name = target_dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| "site".to_string());
        store.store(&Site::new(name))?;
    }

    Ok(())
}
