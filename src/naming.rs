//! Category naming shared by the sequencer and the renderer.
//!
//! A product's category is used twice: as the grouping key when dividers are
//! enabled, and as the label printed on the divider page. Both must go
//! through [`normalize_category`] so that a missing category and an empty one
//! end up in the same group under the same label.
//!
//! ## Slugs
//!
//! Divider pages get an HTML anchor derived from the category name:
//! - `"Electronics"` → `electronics`
//! - `"Home & Garden"` → `home-garden`
//! - `"  Ski  Wear "` → `ski-wear`

/// Default label for products without a category.
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Resolve a raw category to its grouping key / display label.
///
/// `None`, `""` and whitespace-only strings collapse to `uncategorized_label`.
/// Any other value is returned with surrounding whitespace trimmed.
pub fn normalize_category(category: Option<&str>, uncategorized_label: &str) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => uncategorized_label.to_string(),
    }
}

/// Lowercase ASCII slug for anchors: alphanumeric runs joined by single dashes.
///
/// Non-ASCII letters are dropped. Returns `"category"` when nothing is left.
pub fn category_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "category".to_string()
    } else {
        slug
    }
}
