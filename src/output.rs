//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output leads with what the catalog contains (categories, pages, products)
//! and shows file paths only as secondary context.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Products (7)
//! 001 Lighting (3 products)
//! 002 Textiles (2 products)
//! 003 Uncategorized (2 products)
//!
//! Config
//!     catalog.toml
//!     Layout: minimalist, 1 column, 2 per page
//!     Cover page: on
//!     Category dividers: on
//! ```
//!
//! ## Sequence
//!
//! ```text
//! Pages (7, 2 products per page)
//! 001 Cover
//! 002 Products (2)
//!     Brass Desk Lamp
//!     Paper Pendant
//! 003 Products (1)
//!     Clip-on Reading Light
//! 004 Divider: Textiles
//! ...
//! ```
//!
//! ## Generate
//!
//! ```text
//! Catalog → index.html
//! 001 Cover → pages/001.html
//! 002 Products (2) → pages/002.html
//!
//! Generated 7 pages, 7 products
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::config::CatalogConfig;
use crate::generate::GenerateReport;
use crate::layouts::{LayoutRegistry, Source};
use crate::scan::Manifest;
use crate::types::{PageDescriptor, PageSequence};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// One-line page label: `Cover`, `Divider: Textiles`, `Products (2)`.
fn page_label(page: &PageDescriptor) -> String {
    match page {
        PageDescriptor::Cover => "Cover".to_string(),
        PageDescriptor::Divider { category_name, .. } => format!("Divider: {category_name}"),
        PageDescriptor::Products { products } => format!("Products ({})", products.len()),
    }
}

/// Header line for a page: positional index + label.
fn page_header(index: usize, page: &PageDescriptor) -> String {
    format!("{} {}", format_index(index), page_label(page))
}

fn layout_summary(config: &CatalogConfig) -> String {
    format!(
        "Layout: {}, {}, {} per page",
        config.layout.template,
        plural(config.layout.columns, "column", "columns"),
        config.items_per_page()
    )
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: product inventory by category, then config.
pub fn format_scan_output(manifest: &Manifest, has_config_file: bool) -> Vec<String> {
    let mut lines = vec![format!("Products ({})", manifest.products.len())];

    for (i, (category, count)) in manifest.category_counts().iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category,
            plural(*count, "product", "products")
        ));
    }

    let config = &manifest.config;
    lines.push(String::new());
    lines.push("Config".to_string());
    if has_config_file {
        lines.push(format!("{}{}", indent(1), crate::config::CONFIG_FILE));
    }
    lines.push(format!("{}{}", indent(1), layout_summary(config)));
    lines.push(format!(
        "{}Cover page: {}",
        indent(1),
        on_off(config.pages.enable_cover_page)
    ));
    lines.push(format!(
        "{}Category dividers: {}",
        indent(1),
        on_off(config.pages.enable_category_dividers)
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, has_config_file: bool) {
    for line in format_scan_output(manifest, has_config_file) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Sequence output
// ============================================================================

/// Format the page sequence: one header per page, product names indented.
pub fn format_sequence_output(sequence: &PageSequence) -> Vec<String> {
    let mut lines = vec![format!(
        "Pages ({}, {} per page)",
        sequence.len(),
        plural(sequence.items_per_page, "product", "products")
    )];
    for (i, page) in sequence.pages.iter().enumerate() {
        lines.extend(format_page(i + 1, page));
    }
    lines
}

/// Format a single page: header plus indented product names.
pub fn format_page(index: usize, page: &PageDescriptor) -> Vec<String> {
    let mut lines = vec![page_header(index, page)];
    for product in page.products() {
        lines.push(format!("{}{}", indent(1), product.display_name()));
    }
    lines
}

/// Print the page sequence to stdout.
pub fn print_sequence_output(sequence: &PageSequence) {
    for line in format_sequence_output(sequence) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output: each page and the file it was written to.
pub fn format_generate_output(sequence: &PageSequence, report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Catalog → {}", report.index)];
    for (i, (page, file)) in sequence.pages.iter().zip(&report.page_files).enumerate() {
        lines.push(format!("{} → {}", page_header(i + 1, page), file));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.page_files.len(), "page", "pages"),
        plural(report.product_count, "product", "products")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(sequence: &PageSequence, report: &GenerateReport) {
    for line in format_generate_output(sequence, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Layout listing
// ============================================================================

/// Format the capacity table at a given column count, marking the selected layout.
pub fn format_layouts(registry: &LayoutRegistry, columns: usize, selected: &str) -> Vec<String> {
    let mut lines = vec![format!("Layouts ({})", plural(columns, "column", "columns"))];
    for (id, capacity, source) in registry.entries() {
        let marker = if id == selected { "*" } else { " " };
        let origin = match source {
            Source::Config => " (catalog.toml)",
            Source::Builtin | Source::Fallback => "",
        };
        lines.push(format!(
            "{marker} {id}: {} [{}]{origin}",
            capacity.items_per_page(columns),
            capacity.describe()
        ));
    }
    if !registry.contains(selected) {
        let (capacity, _) = registry.capacity(selected);
        lines.push(format!(
            "* {selected}: {} [default, {}]",
            capacity.items_per_page(columns),
            capacity.describe()
        ));
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================
