//! Build the site
//!
//! Phases, in order:
//!
//! 1. load the site state
//! 2. ensure the output root exists
//! 3. advance the version and persist the site state
//! 4. copy static assets
//! 5. generate all pages
//! 6. build the stylesheet and store it in the site data
//! 7. generate all pages again, now with the stylesheet available
//!
//! With `build.single_pass` the stylesheet is built before step 5 and
//! step 7 is skipped.

use std::fs;
use std::time::Instant;

use crate::assets;
use crate::error::{IoResultExt, Result};
use crate::generator::{Generator, PassStats};
use crate::paths::STATIC_DIR;
use crate::site::{Site, SiteStore, Version, STYLE_KEY};
use crate::stylesheet::{SassCommand, StylesheetBuilder};
use crate::templates::TemplateRenderer;
use crate::Reweb;

/// File the compiled stylesheet is also written to, under `dist/static/`
pub const STYLESHEET_FILE: &str = "style.min.css";

/// What a build did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub version: Version,
    pub assets: usize,
    pub passes: Vec<PassStats>,
}

/// Build with the stylesheet compiler from the configuration
pub fn run(reweb: &Reweb) -> Result<BuildReport> {
    if reweb.config.stylesheet.enable {
        let sass = SassCommand::new(reweb.config.stylesheet.clone(), &reweb.layout.base_dir);
        run_with(reweb, Some(&sass))
    } else {
        run_with(reweb, None)
    }
}

/// Build with an explicit stylesheet builder; `None` skips the stylesheet
/// step
pub fn run_with(reweb: &Reweb, stylesheet: Option<&dyn StylesheetBuilder>) -> Result<BuildReport> {
    let start = Instant::now();
    let layout = &reweb.layout;
    let store = reweb.site_store();

    let mut site = store.load()?;
    tracing::info!("Building {} from {:?}", site.name, layout.content_dir);

    fs::create_dir_all(&layout.output_dir).at(&layout.output_dir)?;

    bump_version(&mut site, &store)?;

    let copied = assets::copy_static(layout)?;
    tracing::info!("Copied {} static files", copied);

    let generator = reweb.generator()?;
    let mut passes = Vec::new();

    if reweb.config.build.single_pass {
        apply_stylesheet(&mut site, stylesheet, generator.renderer(), reweb)?;
        passes.push(generate_pass(&generator, &site, "single")?);
    } else {
        passes.push(generate_pass(&generator, &site, "first")?);
        apply_stylesheet(&mut site, stylesheet, generator.renderer(), reweb)?;
        passes.push(generate_pass(&generator, &site, "second")?);
    }

    tracing::info!(
        "Built version {} in {:.2}s",
        site.version,
        start.elapsed().as_secs_f64()
    );

    Ok(BuildReport {
        version: site.version,
        assets: copied,
        passes,
    })
}

/// Advance the site version and persist the site state. Runs once per
/// build, before any page is generated.
pub fn bump_version(site: &mut Site, store: &SiteStore) -> Result<()> {
    let next = site.version.next();
    tracing::info!("Version {} -> {}", site.version, next);
    site.version = next;
    store.store(site)
}

/// Build the stylesheet, store it in the site data and write it under
/// `dist/static/`
fn apply_stylesheet(
    site: &mut Site,
    stylesheet: Option<&dyn StylesheetBuilder>,
    templates: &TemplateRenderer,
    reweb: &Reweb,
) -> Result<()> {
    let Some(builder) = stylesheet else {
        tracing::info!("Stylesheet disabled");
        return Ok(());
    };

    let css = builder.build(site, templates)?;

    let static_dir = reweb.layout.output_dir.join(STATIC_DIR);
    fs::create_dir_all(&static_dir).at(&static_dir)?;
    let dest = static_dir.join(STYLESHEET_FILE);
    fs::write(&dest, &css).at(&dest)?;
    tracing::info!("Stylesheet: {} bytes -> {:?}", css.len(), dest);

    site.data
        .insert(STYLE_KEY.to_string(), serde_json::Value::String(css));
    Ok(())
}

fn generate_pass(generator: &Generator, site: &Site, label: &str) -> Result<PassStats> {
    let stats = generator.generate_pages(site)?;
    tracing::info!(
        "{} pass: {} pages ({} markdown, {} html, {} from {} patterns)",
        label,
        stats.pages(),
        stats.markdown,
        stats.html,
        stats.pattern_pages,
        stats.patterns
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::stylesheet::StaticStylesheet;
    use std::path::Path;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(&root.join("_config.yml"), "highlight:\n  enable: false\n");
        write(&root.join("site.yml"), "name: demo\nversion: 1.0.0\n");
        write(
            &root.join("templates/layout.html"),
            "<style>{{ site.data.style | default(value='') }}</style>\
             {% if page is defined %}<title>{{ page.title }}</title>{% endif %}{{ content }}",
        );
        write(
            &root.join("templates/member.html"),
            "<h2>{{ members.name }}</h2>",
        );
        write(&root.join("templates/robots.txt"), "User-agent: *\n");
        write(&root.join("static/app.js"), "console.log(1)");
        write(&root.join("pages/about.md"), "---\ntitle: About\n---\n# Hi\n");
        write(&root.join("pages/contact.html"), "<form></form>");
        write(
            &root.join("pages/team/_members.json"),
            r#"{"source": "data/members.json", "template": "member.html", "basepath_attr": "id"}"#,
        );
        write(
            &root.join("data/members.json"),
            r#"[{"id": "ada", "name": "Ada"}, {"id": "alan", "name": "Alan"}, {"id": "grace", "name": "Grace"}]"#,
        );
        dir
    }

    fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(dir).unwrap().display().to_string();
                (rel, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_full_build() {
        let dir = project();
        let reweb = Reweb::new(dir.path()).unwrap();
        let css = StaticStylesheet("body{margin:0}".to_string());

        let report = run_with(&reweb, Some(&css)).unwrap();

        assert_eq!(report.version.to_string(), "1.0.1");
        assert_eq!(report.assets, 2);
        assert_eq!(report.passes.len(), 2);
        assert_eq!(report.passes[0], report.passes[1]);
        assert_eq!(report.passes[1].pages(), 5);

        let dist = dir.path().join("dist");
        let about = fs::read_to_string(dist.join("about.html")).unwrap();
        assert_eq!(
            about,
            "<style>body{margin:0}</style><title>About</title><h1>Hi</h1>\n"
        );
        let contact = fs::read_to_string(dist.join("contact.html")).unwrap();
        assert_eq!(contact, "<style>body{margin:0}</style><form></form>");

        let mut team: Vec<_> = fs::read_dir(dist.join("team"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        team.sort();
        assert_eq!(team, vec!["ada.html", "alan.html", "grace.html"]);

        assert!(dist.join("static/app.js").is_file());
        assert!(dist.join("robots.txt").is_file());
        assert_eq!(
            fs::read_to_string(dist.join("static/style.min.css")).unwrap(),
            "body{margin:0}"
        );

        // Version persisted, stylesheet not
        let stored = reweb.site_store().load().unwrap();
        assert_eq!(stored.version.to_string(), "1.0.1");
        assert!(stored.style().is_none());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let dir = project();
        let reweb = Reweb::new(dir.path()).unwrap();
        let css = StaticStylesheet("p{}".to_string());

        run_with(&reweb, Some(&css)).unwrap();
        let first = snapshot(&dir.path().join("dist"));
        let report = run_with(&reweb, Some(&css)).unwrap();
        let second = snapshot(&dir.path().join("dist"));

        assert_eq!(first, second);
        assert_eq!(report.version.to_string(), "1.0.2");
    }

    #[test]
    fn test_single_pass() {
        let dir = project();
        write(
            &dir.path().join("_config.yml"),
            "highlight:\n  enable: false\nbuild:\n  single_pass: true\n",
        );
        let reweb = Reweb::new(dir.path()).unwrap();
        let css = StaticStylesheet("i{}".to_string());

        let report = run_with(&reweb, Some(&css)).unwrap();
        assert_eq!(report.passes.len(), 1);
        let about = fs::read_to_string(dir.path().join("dist/about.html")).unwrap();
        assert!(about.starts_with("<style>i{}</style>"));
    }

    #[test]
    fn test_stale_output_is_kept() {
        let dir = project();
        write(&dir.path().join("dist/old.html"), "old");
        let reweb = Reweb::new(dir.path()).unwrap();

        run_with(&reweb, None).unwrap();
        assert!(dir.path().join("dist/old.html").is_file());
        assert!(!dir.path().join("dist/static/style.min.css").exists());
    }

    #[test]
    fn test_unsupported_file_fails_after_version_bump() {
        let dir = project();
        write(&dir.path().join("pages/zz-notes.txt"), "nope");
        let reweb = Reweb::new(dir.path()).unwrap();

        let err = run_with(&reweb, None).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedContent { .. }));
        assert!(!dir.path().join("dist/zz-notes.txt").exists());
        // The version step precedes page generation
        let stored = reweb.site_store().load().unwrap();
        assert_eq!(stored.version.to_string(), "1.0.1");
    }

    #[test]
    fn test_stylesheet_failure_is_fatal() {
        struct Broken;
        impl StylesheetBuilder for Broken {
            fn build(&self, _site: &Site, _templates: &TemplateRenderer) -> Result<String> {
                Err(BuildError::ExternalTool {
                    tool: "sass".to_string(),
                    message: "network down".to_string(),
                })
            }
        }

        let dir = project();
        let reweb = Reweb::new(dir.path()).unwrap();
        let err = run_with(&reweb, Some(&Broken)).unwrap_err();
        assert!(matches!(err, BuildError::ExternalTool { .. }));
        // First pass output remains
        let about = fs::read_to_string(dir.path().join("dist/about.html")).unwrap();
        assert!(about.starts_with("<style></style>"));
    }
}
