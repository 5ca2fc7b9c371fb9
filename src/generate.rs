//! HTML site generation.
//!
//! Second stage of the build. Takes the loaded [`Manifest`] and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Listing page** (`/index.html`): one card per digest, newest first,
//!   with the formatted date, title, excerpt and a "read more" link
//! - **Digest pages** (`/digests/{slug}/index.html`): the full digest body
//!   rendered from markdown, with a link back to the listing
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── favicon.svg
//! ├── robots.txt                 # anything under content/assets/
//! └── digests/
//!     ├── 2025-06-06/
//!     │   └── index.html
//!     └── 2025-06-07/
//!         └── index.html
//! ```
//!
//! ## Page Shell
//!
//! Every page shares [`base_document`]: SEO head (description, canonical
//! URL, Open Graph and Twitter cards), the site header with the dark-mode
//! toggle, and a footer carrying the build year. CSS is inlined; colors come
//! from `config.toml`. The theme scripts come from [`crate::theme`].
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Digest bodies go through `pulldown-cmark` and are inserted unescaped;
//! everything else is escaped by maud.

use crate::config::{self, SiteMeta};
use crate::content::Manifest;
use crate::dates::format_pub_date;
use crate::excerpt;
use crate::naming::digest_url;
use crate::theme;
use crate::types::Digest;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset {0} would overwrite a generated file")]
    AssetCollision(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const FAVICON_SVG: &str = include_str!("../static/favicon.svg");
const FAVICON_PATH: &str = "/favicon.svg";
const EMPTY_LISTING: &str = "No digests published yet.";

/// A page written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory
    pub file: String,
}

/// What a [`generate`] run produced, for CLI output.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Listing page first, then digests in listing order
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
}

/// Shared inputs for every page shell.
struct Layout<'a> {
    site: &'a SiteMeta,
    css: &'a str,
    year: i32,
}

/// Head metadata for one page.
struct PageMeta<'a> {
    /// `None` for the listing page, which uses the bare site title
    title: Option<&'a str>,
    description: &'a str,
    /// Site-relative URL path
    path: &'a str,
}

pub fn generate(
    manifest: &Manifest,
    output_dir: &Path,
    build_year: i32,
) -> Result<GenerateReport, GenerateError> {
    let color_css = config::generate_color_css(&manifest.config.colors, theme::DARK_CLASS);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let layout = Layout {
        site: &manifest.config.site,
        css: &css,
        year: build_year,
    };

    let digests = sorted_by_date(&manifest.digests);
    if let Some(assets_dir) = &manifest.assets_dir {
        check_asset_collisions(assets_dir, &digests)?;
    }

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    let index_html = render_index(&digests, &layout);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    log::debug!("wrote index.html");
    report.pages.push(GeneratedPage {
        title: layout.site.title.clone(),
        file: "index.html".to_string(),
    });

    for digest in &digests {
        let digest_dir = output_dir.join("digests").join(&digest.slug);
        fs::create_dir_all(&digest_dir)?;

        let page_html = render_digest_page(digest, &layout);
        fs::write(digest_dir.join("index.html"), page_html.into_string())?;

        let file = format!("digests/{}/index.html", digest.slug);
        log::debug!("wrote {file}");
        report.pages.push(GeneratedPage {
            title: digest.title.clone(),
            file,
        });
    }

    fs::write(
        output_dir.join(FAVICON_PATH.trim_start_matches('/')),
        FAVICON_SVG,
    )?;

    if let Some(assets_dir) = &manifest.assets_dir {
        report.assets_copied = copy_dir_recursive(assets_dir, output_dir)?;
    }

    log::info!(
        "generated {} pages in {}",
        report.pages.len(),
        output_dir.display()
    );
    Ok(report)
}

/// Newest first. The sort is stable, so equal dates keep load order.
pub fn sorted_by_date(digests: &[Digest]) -> Vec<&Digest> {
    let mut sorted: Vec<&Digest> = digests.iter().collect();
    sorted.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    sorted
}

/// Output paths the generator owns, relative to the output directory.
fn generated_paths(digests: &[&Digest]) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("index.html"),
        PathBuf::from(FAVICON_PATH.trim_start_matches('/')),
    ];
    paths.extend(
        digests
            .iter()
            .map(|d| Path::new("digests").join(&d.slug).join("index.html")),
    );
    paths
}

/// Reject any asset that would land on a generated page or the favicon.
///
/// Runs before anything is written, so a collision leaves no output behind.
fn check_asset_collisions(assets_dir: &Path, digests: &[&Digest]) -> Result<(), GenerateError> {
    let reserved = generated_paths(digests);
    for entry in WalkDir::new(assets_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(assets_dir)
            .unwrap_or(entry.path());
        if reserved.iter().any(|p| p == rel) {
            return Err(GenerateError::AssetCollision(rel.to_path_buf()));
        }
    }
    Ok(())
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render markdown to HTML with the extensions digests use.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(body, options);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(meta: &PageMeta, layout: &Layout, content: Markup) -> Markup {
    let site = layout.site;
    let full_title = match meta.title {
        Some(title) => format!("{} | {}", title, site.title),
        None => site.title.clone(),
    };
    let og_title = meta.title.unwrap_or(&site.title);
    let og_type = if meta.title.is_some() { "article" } else { "website" };
    let url = site.absolute_url(meta.path);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(url);
                link rel="icon" type="image/svg+xml" href=(FAVICON_PATH);

                meta property="og:type" content=(og_type);
                meta property="og:title" content=(og_title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(url);
                meta property="og:site_name" content=(site.title);

                meta name="twitter:card" content="summary";
                meta name="twitter:title" content=(og_title);
                meta name="twitter:description" content=(meta.description);

                script { (PreEscaped(theme::head_script())) }
                style { (PreEscaped(layout.css)) }
            }
            body {
                (site_header(site))
                (content)
                (site_footer(site, layout.year))
                script { (PreEscaped(theme::script())) }
            }
        }
    }
}

/// Renders the site header with the home link and theme toggle
fn site_header(site: &SiteMeta) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site.title) }
            button.theme-toggle id="theme-toggle" type="button"
                aria-label="Toggle dark mode" aria-pressed="false" {
                span.icon-light aria-hidden="true" { "🌙" }
                span.icon-dark aria-hidden="true" { "☀️" }
            }
        }
    }
}

fn site_footer(site: &SiteMeta, year: i32) -> Markup {
    html! {
        footer.site-footer {
            p { "© " (year) " " (site.title) }
        }
    }
}

/// Listing card for one digest
fn digest_card(digest: &Digest) -> Markup {
    let url = digest_url(&digest.slug);
    html! {
        article.digest-card {
            time.digest-date datetime=(digest.pub_date) { (format_pub_date(&digest.pub_date)) }
            h2 {
                a href=(url) { (digest.title) }
            }
            p.digest-excerpt { (excerpt::extract(&digest.body)) }
            a.read-more href=(url) { "Read more →" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the listing page. `digests` must already be in display order.
fn render_index(digests: &[&Digest], layout: &Layout) -> Markup {
    let meta = PageMeta {
        title: None,
        description: &layout.site.description,
        path: "/",
    };

    let content = html! {
        main.index-page {
            @if digests.is_empty() {
                p.empty-state { (EMPTY_LISTING) }
            } @else {
                ul.digest-list {
                    @for digest in digests {
                        li { (digest_card(digest)) }
                    }
                }
            }
        }
    };

    base_document(&meta, layout, content)
}

/// Renders a digest detail page
fn render_digest_page(digest: &Digest, layout: &Layout) -> Markup {
    let path = digest_url(&digest.slug);
    let meta = PageMeta {
        title: Some(&digest.title),
        description: &digest.description,
        path: &path,
    };

    let content = html! {
        main.digest-page {
            a.back-link href="/" { "← All digests" }
            article {
                header.digest-header {
                    h1 { (digest.title) }
                    time.digest-date datetime=(digest.pub_date) {
                        (format_pub_date(&digest.pub_date))
                    }
                }
                div.digest-body {
                    (PreEscaped(render_markdown(&digest.body)))
                }
            }
        }
    };

    base_document(&meta, layout, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::digest;

    fn test_site() -> SiteMeta {
        SiteMeta {
            title: "Test Daily".to_string(),
            description: "Test description".to_string(),
            base_url: "https://test.example".to_string(),
        }
    }

    fn layout(site: &SiteMeta) -> Layout<'_> {
        Layout {
            site,
            css: "body {}",
            year: 2025,
        }
    }

    #[test]
    fn sorted_by_date_is_descending() {
        let digests = vec![
            digest("a", "A", "2025-01-02", ""),
            digest("b", "B", "2025-03-01", ""),
            digest("c", "C", "2024-12-31", ""),
        ];
        let sorted: Vec<&str> = sorted_by_date(&digests)
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(sorted, vec!["b", "a", "c"]);
    }

    #[test]
    fn sorted_by_date_keeps_tie_order() {
        let digests = vec![
            digest("first", "First", "2025-01-01", ""),
            digest("newer", "Newer", "2025-02-01", ""),
            digest("second", "Second", "2025-01-01", ""),
        ];
        let sorted: Vec<&str> = sorted_by_date(&digests)
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(sorted, vec!["newer", "first", "second"]);
    }

    #[test]
    fn generated_paths_cover_pages_and_favicon() {
        let d = digest("2025-06-07", "X", "2025-06-07", "");
        let paths = generated_paths(&[&d]);
        assert!(paths.contains(&PathBuf::from("index.html")));
        assert!(paths.contains(&PathBuf::from("favicon.svg")));
        assert!(paths.contains(&PathBuf::from("digests/2025-06-07/index.html")));
    }

    #[test]
    fn asset_colliding_with_page_is_rejected_before_writing() {
        let src = tempfile::TempDir::new().unwrap();
        let out = tempfile::TempDir::new().unwrap();
        let assets = src.path().join("assets");
        fs::create_dir_all(assets.join("digests/2025-06-07")).unwrap();
        fs::write(assets.join("digests/2025-06-07/index.html"), "stale").unwrap();

        let manifest = Manifest {
            digests: vec![digest("2025-06-07", "X", "2025-06-07", "body")],
            config: config::SiteConfig::default(),
            assets_dir: Some(assets),
        };
        let dist = out.path().join("dist");
        let err = generate(&manifest, &dist, 2025).unwrap_err();

        match err {
            GenerateError::AssetCollision(path) => {
                assert_eq!(path, PathBuf::from("digests/2025-06-07/index.html"))
            }
            other => panic!("expected AssetCollision, got {other:?}"),
        }
        assert!(!dist.exists());
    }

    #[test]
    fn unrelated_assets_do_not_collide() {
        let src = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("digests/other")).unwrap();
        fs::write(src.path().join("digests/other/index.html"), "ok").unwrap();
        fs::write(src.path().join("robots.txt"), "ok").unwrap();

        let d = digest("2025-06-07", "X", "2025-06-07", "");
        assert!(check_asset_collisions(src.path(), &[&d]).is_ok());
    }

    #[test]
    fn base_document_includes_doctype() {
        let site = test_site();
        let meta = PageMeta {
            title: None,
            description: "d",
            path: "/",
        };
        let doc = base_document(&meta, &layout(&site), html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn base_document_seo_tags() {
        let site = test_site();
        let meta = PageMeta {
            title: Some("Hello"),
            description: "World",
            path: "/digests/hello/",
        };
        let doc = base_document(&meta, &layout(&site), html! {}).into_string();

        assert!(doc.contains("<title>Hello | Test Daily</title>"));
        assert!(doc.contains(r#"<meta name="description" content="World">"#));
        assert!(doc.contains(
            r#"<link rel="canonical" href="https://test.example/digests/hello/">"#
        ));
        assert!(doc.contains(r#"<meta property="og:title" content="Hello">"#));
        assert!(doc.contains(r#"<meta property="og:type" content="article">"#));
        assert!(doc.contains(r#"<meta name="twitter:card" content="summary">"#));
        assert!(doc.contains(r#"<meta name="twitter:description" content="World">"#));
        assert!(doc.contains(r#"href="/favicon.svg""#));
    }

    #[test]
    fn index_title_is_bare_site_title() {
        let site = test_site();
        let doc = render_index(&[], &layout(&site)).into_string();
        assert!(doc.contains("<title>Test Daily</title>"));
        assert!(doc.contains(r#"<meta property="og:type" content="website">"#));
    }

    #[test]
    fn header_has_theme_toggle_and_footer_has_year() {
        let site = test_site();
        let doc = render_index(&[], &layout(&site)).into_string();
        assert!(doc.contains(r#"id="theme-toggle""#));
        assert!(doc.contains("© 2025 Test Daily"));
        assert!(doc.contains("localStorage"));
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        let site = test_site();
        let doc = render_index(&[], &layout(&site)).into_string();
        assert!(doc.contains(EMPTY_LISTING));
        assert!(!doc.contains("digest-list"));
    }

    #[test]
    fn listing_card_contents() {
        let site = test_site();
        let d = digest(
            "2025-06-07",
            "News Digest - June 7, 2025",
            "2025-06-07",
            "## 🧠 Summary\n\nShort text.\n\n## Stories\n\nMore.",
        );
        let doc = render_index(&[&d], &layout(&site)).into_string();

        assert!(doc.contains("June 7, 2025</time>"));
        assert!(doc.contains(r#"datetime="2025-06-07""#));
        assert!(doc.contains(r#"href="/digests/2025-06-07/""#));
        assert!(doc.contains(r#"<p class="digest-excerpt">Short text.</p>"#));
        assert!(doc.contains("Read more →"));
        assert!(!doc.contains(EMPTY_LISTING));
    }

    #[test]
    fn listing_preserves_given_order() {
        let site = test_site();
        let newer = digest("newer", "Newer", "2025-02-01", "n");
        let older = digest("older", "Older", "2025-01-01", "o");
        let doc = render_index(&[&newer, &older], &layout(&site)).into_string();
        assert!(doc.find("/digests/newer/").unwrap() < doc.find("/digests/older/").unwrap());
    }

    #[test]
    fn invalid_calendar_date_renders_placeholder() {
        let site = test_site();
        let d = digest("x", "X", "2025-02-30", "body");
        let doc = render_index(&[&d], &layout(&site)).into_string();
        assert!(doc.contains("Invalid Date"));
    }

    #[test]
    fn digest_page_renders_markdown_body() {
        let site = test_site();
        let d = digest("x", "X Title", "2025-06-07", "This is **bold**.\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        let doc = render_digest_page(&d, &layout(&site)).into_string();

        assert!(doc.contains("<strong>bold</strong>"));
        assert!(doc.contains("<table>"));
        assert!(doc.contains("<h1>X Title</h1>"));
        assert!(doc.contains("June 7, 2025"));
        assert!(doc.contains(r#"class="back-link""#));
        assert!(doc.contains("← All digests"));
        assert!(doc.contains("<title>X Title | Test Daily</title>"));
    }

    #[test]
    fn html_escape_in_maud() {
        let site = test_site();
        let d = digest("x", "<script>alert('xss')</script>", "2025-06-07", "");
        let doc = render_index(&[&d], &layout(&site)).into_string();
        assert!(!doc.contains("<script>alert"));
        assert!(doc.contains("&lt;script&gt;"));
    }
}
