//! Shared test utilities for the simple-catalog test suite.
//!
//! Provides fixture setup, product builders, and compact page-sequence
//! assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let products = products_in(&[("1", Some("Electronics")), ("2", Some("Clothing"))]);
//! let pages = sequence_pages(&products, &options).unwrap();
//!
//! assert_page_shape(&pages, &["cover", "products:1", "divider:Clothing", "products:1"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{PageDescriptor, Product};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/catalog/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Product builders
// =========================================================================

/// Products from `(id, category)` pairs, in order.
pub fn products_in(specs: &[(&str, Option<&str>)]) -> Vec<Product> {
    specs
        .iter()
        .map(|(id, category)| Product::new(*id, *category))
        .collect()
}

/// Ids of the products on a page.
pub fn product_ids(page: &PageDescriptor) -> Vec<&str> {
    page.products().iter().map(|p| p.id.as_str()).collect()
}

// =========================================================================
// Sequence assertions
// =========================================================================

/// One-word description of a page: `cover`, `divider:<name>`, `products:<n>`.
pub fn page_shape(page: &PageDescriptor) -> String {
    match page {
        PageDescriptor::Cover => "cover".to_string(),
        PageDescriptor::Divider { category_name, .. } => format!("divider:{category_name}"),
        PageDescriptor::Products { products } => format!("products:{}", products.len()),
    }
}

/// Assert the sequence matches an expected list of page shapes.
///
/// ```rust
/// assert_page_shape(&pages, &["cover", "products:2", "divider:Clothing", "products:1"]);
/// ```
pub fn assert_page_shape(pages: &[PageDescriptor], expected: &[&str]) {
    let actual: Vec<String> = pages.iter().map(page_shape).collect();
    assert_eq!(actual, expected, "page sequence shape mismatch");
}
