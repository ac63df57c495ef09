//! HTML pages: the file body is passed through the layout verbatim

use std::fs;
use std::path::Path;

use super::{site_context, write_output, Generator};
use crate::error::{IoResultExt, Result};
use crate::site::Site;

pub fn generate(gen: &Generator, source: &Path, site: &Site) -> Result<()> {
    let content = fs::read_to_string(source).at(source)?;

    let mut context = site_context(site);
    context.insert("content", &content);

    let output = gen.wrap(source, &context)?;
    let dest = gen.layout.prepare_output_path(source, None)?;
    write_output(&dest, output.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{generator, write};
    use super::*;
    use crate::templates::TemplateRenderer;
    use tempfile::TempDir;

    #[test]
    fn test_body_is_not_parsed() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("pages/docs/index.html");
        write(&source, "---\ntitle: not front matter\n---\n<p>*raw*</p>");

        let gen = generator(dir.path(), &[]);
        generate(&gen, &source, &Site::new("t")).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/docs/index.html")).unwrap();
        assert_eq!(
            html,
            "<html><body>---\ntitle: not front matter\n---\n<p>*raw*</p></body></html>"
        );
    }

    #[test]
    fn test_context_has_no_type_or_page() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("pages/x.html");
        write(&source, "<b>x</b>");

        let mut gen = generator(dir.path(), &[]);
        gen.renderer = TemplateRenderer::from_raw(
            &[(
                "layout.html",
                "{% if type is defined or page is defined %}tagged{% else %}plain{% endif %}:{{ content }}",
            )],
            "layout.html",
        )
        .unwrap();

        generate(&gen, &source, &Site::new("t")).unwrap();
        let html = fs::read_to_string(dir.path().join("dist/x.html")).unwrap();
        assert_eq!(html, "plain:<b>x</b>");
    }

    #[test]
    fn test_style_from_site_reaches_layout() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("pages/x.html");
        write(&source, "x");

        let mut gen = generator(dir.path(), &[]);
        gen.renderer = TemplateRenderer::from_raw(
            &[(
                "layout.html",
                "<style>{{ site.data.style | default(value='') }}</style>{{ content }}",
            )],
            "layout.html",
        )
        .unwrap();

        let mut site = Site::new("t");
        generate(&gen, &source, &site).unwrap();
        let before = fs::read_to_string(dir.path().join("dist/x.html")).unwrap();
        assert_eq!(before, "<style></style>x");

        site.data
            .insert(crate::site::STYLE_KEY.to_string(), serde_json::json!("a{b:c}"));
        generate(&gen, &source, &site).unwrap();
        let after = fs::read_to_string(dir.path().join("dist/x.html")).unwrap();
        assert_eq!(after, "<style>a{b:c}</style>x");
    }
}
