//! HTML catalog generation.
//!
//! Stage 3 of the build pipeline. Takes the scan manifest and the page
//! sequence and writes the static HTML catalog.
//!
//! ## Generated Files
//!
//! - **Catalog** (`/index.html`): every page stacked in order, the shared
//!   and printed view of the finished catalog
//! - **Single pages** (`/pages/NNN.html`): one page per file with
//!   previous/next links, the page-at-a-time preview
//!
//! Both are rendered from the same [`PageSequence`], so the page-at-a-time
//! preview and the full catalog always paginate identically.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! └── pages/
//!     ├── 001.html
//!     ├── 002.html
//!     └── ...
//! ```
//!
//! ## Page Rendering
//!
//! Pages are A4 portrait sections. Colors and the grid column count come from
//! `catalog.toml` as CSS custom properties; the static stylesheet is embedded
//! at compile time. The cover description is markdown, rendered with
//! pulldown-cmark.

use crate::config::{self, CatalogConfig, CatalogInfo};
use crate::naming::category_slug;
use crate::navigation::PageCursor;
use crate::scan::Manifest;
use crate::types::{PageDescriptor, PageSequence, Product};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the generate stage wrote, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub index: String,
    pub page_files: Vec<String>,
    pub product_count: usize,
}

const CSS_STATIC: &str = include_str!("../static/catalog.css");

/// Directory for single-page files inside the output directory.
pub const PAGES_DIR: &str = "pages";

pub fn generate(
    manifest: &Manifest,
    sequence: &PageSequence,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let theme_css = config::generate_theme_css(&config.colors, &config.layout);
    let css = format!("{}\n\n{}", theme_css, CSS_STATIC);

    let pages_dir = output_dir.join(PAGES_DIR);
    fs::create_dir_all(&pages_dir)?;
    remove_page_files(&pages_dir)?;

    let index_html = render_catalog(config, sequence, &css);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    info!("generated index.html");

    let mut page_files = Vec::with_capacity(sequence.len());
    for index in 0..sequence.len() {
        let cursor = PageCursor::at(index, sequence.len());
        let page_html = render_single_page(config, sequence, cursor, &css);
        let filename = page_filename(index);
        fs::write(pages_dir.join(&filename), page_html.into_string())?;
        page_files.push(format!("{PAGES_DIR}/{filename}"));
    }
    info!(pages = page_files.len(), "generated single pages");

    Ok(GenerateReport {
        index: "index.html".to_string(),
        page_files,
        product_count: sequence.product_count(),
    })
}

/// Delete single-page files left by an earlier build.
///
/// The sequence can shrink between builds, so every `*.html` in the pages
/// directory is removed before writing. Other files are left alone.
fn remove_page_files(pages_dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(pages_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "html") {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Read the manifest and page sequence written by earlier stages, then generate.
pub fn generate_from_files(
    manifest_path: &Path,
    pages_path: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest: Manifest = serde_json::from_str(&fs::read_to_string(manifest_path)?)?;
    let sequence: PageSequence = serde_json::from_str(&fs::read_to_string(pages_path)?)?;
    generate(&manifest, &sequence, output_dir)
}

/// File name of the single-page view for a 0-based page index.
pub fn page_filename(index: usize) -> String {
    format!("{:0>3}.html", index + 1)
}

/// Display text for a raw price: numbers get two decimals, strings are shown
/// as written, anything else is not shown.
fn format_price(price: &serde_json::Value) -> Option<String> {
    match price {
        serde_json::Value::Number(n) => n.as_f64().map(|v| format!("{v:.2}")),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Percent-encode the characters that could end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '\'' | '"' | '(' | ')' | '\\') || c.is_whitespace() || c.is_control() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one page of the sequence. `number` is 1-based.
fn render_page(page: &PageDescriptor, number: usize, info: &CatalogInfo) -> Markup {
    let body = match page {
        PageDescriptor::Cover => render_cover(info),
        PageDescriptor::Divider { category_name, .. } => render_divider(category_name),
        PageDescriptor::Products { products } => render_products(products),
    };
    let kind = match page {
        PageDescriptor::Cover => "page-cover",
        PageDescriptor::Divider { .. } => "page-divider",
        PageDescriptor::Products { .. } => "page-products",
    };
    let backdrop = match page {
        PageDescriptor::Divider {
            first_product_image: Some(url),
            ..
        } => Some(format!("background-image: url('{}');", css_url(url))),
        _ => None,
    };
    let slug = match page {
        PageDescriptor::Divider { category_name, .. } => Some(category_slug(category_name)),
        _ => None,
    };

    html! {
        section class={ "page " (kind) } id={ "page-" (number) } style=[backdrop] data-category=[slug] {
            (body)
            @if !page.is_cover() {
                span.page-number { (number) }
            }
        }
    }
}

fn render_cover(info: &CatalogInfo) -> Markup {
    html! {
        @if !info.cover_image.is_empty() {
            img.cover-image src=(info.cover_image) alt=(info.title);
        }
        h1.cover-title { (info.title) }
        @if !info.description.trim().is_empty() {
            div.cover-description {
                (PreEscaped(markdown_to_html(&info.description)))
            }
        }
    }
}

fn render_divider(category_name: &str) -> Markup {
    html! {
        h2.divider-title { (category_name) }
    }
}

fn render_products(products: &[Product]) -> Markup {
    html! {
        @if products.is_empty() {
            p.page-empty { "No products selected" }
        } @else {
            div.product-grid {
                @for product in products {
                    (render_product_card(product))
                }
            }
        }
    }
}

fn render_product_card(product: &Product) -> Markup {
    html! {
        article.product-card data-id=(product.id) {
            @if let Some(url) = &product.image_url {
                img src=(url) alt=(product.display_name()) loading="lazy";
            }
            h3.product-name { (product.display_name()) }
            @if let Some(sku) = &product.sku {
                p.product-sku { (sku) }
            }
            @if let Some(price) = product.price().and_then(format_price) {
                p.product-price { (price) }
            }
            @if let Some(desc) = &product.description {
                p.product-description { (desc) }
            }
        }
    }
}

// ============================================================================
// Document Renderers
// ============================================================================

/// Renders the full catalog with every page in order
fn render_catalog(config: &CatalogConfig, sequence: &PageSequence, css: &str) -> Markup {
    let content = html! {
        main.catalog {
            @for (index, page) in sequence.pages.iter().enumerate() {
                (render_page(page, index + 1, &config.catalog))
            }
        }
    };
    base_document(&config.catalog.title, css, content)
}

/// Renders a single page with previous/next navigation
fn render_single_page(
    config: &CatalogConfig,
    sequence: &PageSequence,
    cursor: PageCursor,
    css: &str,
) -> Markup {
    let index = cursor.index();
    let number = index + 1;
    let title = format!("{} - {}/{}", config.catalog.title, number, cursor.page_count());

    let content = html! {
        nav.page-nav {
            @match cursor.prev_index() {
                Some(prev) => {
                    a href=(page_filename(prev)) rel="prev" { "‹ Previous" }
                }
                None => {
                    span.disabled { "‹ Previous" }
                }
            }
            a href="../index.html" { "All pages" }
            span { (number) " / " (cursor.page_count()) }
            @match cursor.next_index() {
                Some(next) => {
                    a href=(page_filename(next)) rel="next" { "Next ›" }
                }
                None => {
                    span.disabled { "Next ›" }
                }
            }
        }
        main.catalog {
            @if let Some(page) = sequence.pages.get(index) {
                (render_page(page, number, &config.catalog))
            }
        }
    };
    base_document(&title, css, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::sequence_catalog;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn info() -> CatalogInfo {
        CatalogInfo {
            title: "Spring".to_string(),
            description: "Fresh **picks**".to_string(),
            cover_image: "https://cdn.example/cover.jpg".to_string(),
        }
    }

    fn two_page_sequence() -> PageSequence {
        PageSequence {
            items_per_page: 2,
            pages: vec![
                PageDescriptor::Cover,
                PageDescriptor::Products {
                    products: products_in(&[("a", None), ("b", None)]),
                },
            ],
        }
    }

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Test", "body {}", html! { p { "test" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<style>body {}</style>"));
    }

    #[test]
    fn cover_renders_title_image_and_markdown() {
        let html = render_page(&PageDescriptor::Cover, 1, &info()).into_string();
        assert!(html.contains("page-cover"));
        assert!(html.contains("<h1 class=\"cover-title\">Spring</h1>"));
        assert!(html.contains("https://cdn.example/cover.jpg"));
        assert!(html.contains("<strong>picks</strong>"));
        // Cover pages are not numbered
        assert!(!html.contains("page-number"));
    }

    #[test]
    fn cover_without_image_or_description() {
        let info = CatalogInfo::default();
        let html = render_page(&PageDescriptor::Cover, 1, &info).into_string();
        assert!(!html.contains("<img"));
        assert!(!html.contains("cover-description"));
    }

    #[test]
    fn divider_renders_name_backdrop_and_slug() {
        let page = PageDescriptor::Divider {
            category_name: "Home & Garden".to_string(),
            first_product_image: Some("https://cdn.example/1.jpg".to_string()),
        };
        let html = render_page(&page, 3, &info()).into_string();
        assert!(html.contains("Home &amp; Garden"));
        assert!(html.contains("background-image"));
        assert!(html.contains("https://cdn.example/1.jpg"));
        assert!(html.contains(r#"data-category="home-garden""#));
        assert!(html.contains(r#"id="page-3""#));
    }

    #[test]
    fn divider_backdrop_url_cannot_close_the_css_string() {
        let page = PageDescriptor::Divider {
            category_name: "Tools".to_string(),
            first_product_image: Some("https://x.test/a');color:red;(b) c.jpg".to_string()),
        };
        let html = render_page(&page, 2, &info()).into_string();
        assert!(html.contains("https://x.test/a%27%29;color:red;%28b%29%20c.jpg"));
        assert!(!html.contains("a')"));
    }

    #[test]
    fn css_url_leaves_plain_urls_alone() {
        let plain = "https://cdn.example/1.jpg?w=2&h=3";
        assert_eq!(css_url(plain), plain);
        assert_eq!(css_url("a\\b\"c\nd"), "a%5Cb%22c%0Ad");
    }

    #[test]
    fn divider_without_image_has_no_backdrop() {
        let page = PageDescriptor::Divider {
            category_name: "Tools".to_string(),
            first_product_image: None,
        };
        let html = render_page(&page, 2, &info()).into_string();
        assert!(!html.contains("background-image"));
    }

    #[test]
    fn product_page_renders_cards() {
        let mut products = products_in(&[("a", Some("X")), ("b", Some("X"))]);
        products[0].name = Some("Desk Lamp".to_string());
        products[0]
            .extra
            .insert("price".to_string(), serde_json::json!(39.5));
        products[0].sku = Some("LGT-1".to_string());
        let page = PageDescriptor::Products { products };
        let html = render_page(&page, 2, &info()).into_string();
        assert_eq!(html.matches("product-card").count(), 2);
        assert!(html.contains("Desk Lamp"));
        assert!(html.contains("39.50"));
        assert!(html.contains("LGT-1"));
        // Unnamed product falls back to its id
        assert!(html.contains(r#"<h3 class="product-name">b</h3>"#));
    }

    #[test]
    fn price_formatting_follows_raw_value() {
        use serde_json::json;
        assert_eq!(format_price(&json!(12)), Some("12.00".to_string()));
        assert_eq!(format_price(&json!("12.50 EUR")), Some("12.50 EUR".to_string()));
        assert_eq!(format_price(&json!(null)), None);
        assert_eq!(format_price(&json!("")), None);
    }

    #[test]
    fn blank_product_page_shows_placeholder() {
        let page = PageDescriptor::Products { products: vec![] };
        let html = render_page(&page, 1, &info()).into_string();
        assert!(html.contains("page-empty"));
    }

    #[test]
    fn product_names_are_escaped() {
        let mut products = products_in(&[("a", None)]);
        products[0].name = Some("<script>".to_string());
        let html = render_products(&products).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn catalog_renders_every_page() {
        let config = CatalogConfig::default();
        let html = render_catalog(&config, &two_page_sequence(), "").into_string();
        assert!(html.contains(r#"id="page-1""#));
        assert!(html.contains(r#"id="page-2""#));
    }

    #[test]
    fn single_page_first_has_no_previous_link() {
        let config = CatalogConfig::default();
        let seq = two_page_sequence();
        let html = render_single_page(&config, &seq, PageCursor::at(0, seq.len()), "").into_string();
        assert!(!html.contains(r#"rel="prev""#));
        assert!(html.contains(r#"href="002.html""#));
        assert!(html.contains("1 / 2"));
    }

    #[test]
    fn single_page_last_has_no_next_link() {
        let config = CatalogConfig::default();
        let seq = two_page_sequence();
        let html = render_single_page(&config, &seq, PageCursor::at(1, seq.len()), "").into_string();
        assert!(html.contains(r#"href="001.html""#));
        assert!(!html.contains(r#"rel="next""#));
    }

    #[test]
    fn page_filename_is_one_based_and_padded() {
        assert_eq!(page_filename(0), "001.html");
        assert_eq!(page_filename(41), "042.html");
    }

    #[test]
    fn generate_writes_index_and_pages() {
        let fixtures = setup_fixtures();
        let manifest = crate::scan::scan(fixtures.path()).unwrap();
        let sequence = sequence_catalog(&manifest).unwrap();
        let out = TempDir::new().unwrap();

        let report = generate(&manifest, &sequence, out.path()).unwrap();

        assert_eq!(report.page_files.len(), sequence.len());
        assert_eq!(report.product_count, 7);
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("pages/001.html").exists());

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("Spring Home Collection"));
        assert!(index.contains("--grid-columns: 1"));
        assert_eq!(index.matches(r#"class="page page-divider""#).count(), 2);
    }

    #[test]
    fn regenerate_removes_pages_that_no_longer_exist() {
        let fixtures = setup_fixtures();
        let mut manifest = crate::scan::scan(fixtures.path()).unwrap();
        let out = TempDir::new().unwrap();

        let first = sequence_catalog(&manifest).unwrap();
        generate(&manifest, &first, out.path()).unwrap();
        assert!(out.path().join("pages/007.html").exists());

        manifest.config.pages.enable_category_dividers = false;
        let second = sequence_catalog(&manifest).unwrap();
        assert_eq!(second.len(), 5);
        generate(&manifest, &second, out.path()).unwrap();

        let on_disk = fs::read_dir(out.path().join(PAGES_DIR)).unwrap().count();
        assert_eq!(on_disk, second.len());
        assert!(!out.path().join("pages/006.html").exists());
    }

    #[test]
    fn regenerate_keeps_non_html_files() {
        let out = TempDir::new().unwrap();
        let pages_dir = out.path().join(PAGES_DIR);
        fs::create_dir_all(&pages_dir).unwrap();
        fs::write(pages_dir.join("notes.txt"), "keep").unwrap();
        fs::write(pages_dir.join("099.html"), "stale").unwrap();

        let manifest = Manifest {
            products: vec![],
            config: CatalogConfig::default(),
        };
        let sequence = sequence_catalog(&manifest).unwrap();
        generate(&manifest, &sequence, out.path()).unwrap();

        assert!(pages_dir.join("notes.txt").exists());
        assert!(!pages_dir.join("099.html").exists());
    }

    #[test]
    fn generate_from_files_reads_stage_outputs() {
        let fixtures = setup_fixtures();
        let manifest = crate::scan::scan(fixtures.path()).unwrap();
        let sequence = sequence_catalog(&manifest).unwrap();

        let temp = TempDir::new().unwrap();
        let manifest_path = temp.path().join("manifest.json");
        let pages_path = temp.path().join("pages.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();
        fs::write(&pages_path, serde_json::to_string(&sequence).unwrap()).unwrap();

        let out = temp.path().join("dist");
        let report = generate_from_files(&manifest_path, &pages_path, &out).unwrap();
        assert_eq!(report.page_files.len(), 7);
        assert!(out.join("pages/007.html").exists());
    }
}
