//! Catalog page sequencing.
//!
//! Stage 2 of the build pipeline. Turns the ordered product list into the
//! ordered list of pages the renderer draws:
//!
//! ```text
//! products + toggles + items_per_page  →  [Cover, Divider, Products, Products, Divider, ...]
//! ```
//!
//! ## Rules
//!
//! - Products keep their input order. With dividers disabled, concatenating
//!   every products page gives back the input list exactly. With dividers
//!   enabled, categories appear in first-seen order and each category keeps
//!   the input order of its products.
//! - Each products page holds at most `items_per_page` products.
//! - With dividers enabled, each category group opens with a divider page
//!   carrying the category label and the image of its first product. Whether
//!   the first group's divider is shown right after a cover page is decided
//!   by [`FirstDividerPolicy`].
//! - The result is never empty: when nothing else would be produced, a single
//!   blank products page is emitted so there is always something to show.
//!
//! The sequence is a pure function of its inputs and is cheap enough to
//! recompute on every change.

use crate::naming::{self, normalize_category};
use crate::scan::Manifest;
use crate::types::{PageDescriptor, PageSequence, Product};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum SequenceError {
    #[error("items_per_page must be at least 1, got {0}")]
    InvalidItemsPerPage(usize),
}

/// Whether the first category gets a divider when a cover page precedes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirstDividerPolicy {
    /// Omit the first category's divider when the cover page is enabled;
    /// the cover already introduces the catalog.
    #[default]
    SkipAfterCover,
    /// Every category gets a divider, cover or not.
    Always,
}

/// Toggles and capacity for one sequencing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceOptions {
    pub enable_cover_page: bool,
    pub enable_category_dividers: bool,
    pub items_per_page: usize,
    pub first_divider: FirstDividerPolicy,
    /// Label used for products without a category.
    pub uncategorized_label: String,
}

impl SequenceOptions {
    /// Options with both toggles off and the default divider policy.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            enable_cover_page: false,
            enable_category_dividers: false,
            items_per_page,
            first_divider: FirstDividerPolicy::default(),
            uncategorized_label: naming::DEFAULT_UNCATEGORIZED_LABEL.to_string(),
        }
    }

    pub fn with_cover_page(mut self, enabled: bool) -> Self {
        self.enable_cover_page = enabled;
        self
    }

    pub fn with_category_dividers(mut self, enabled: bool) -> Self {
        self.enable_category_dividers = enabled;
        self
    }

    pub fn with_first_divider(mut self, policy: FirstDividerPolicy) -> Self {
        self.first_divider = policy;
        self
    }

    pub fn with_uncategorized_label(mut self, label: impl Into<String>) -> Self {
        self.uncategorized_label = label.into();
        self
    }
}

/// Build the ordered page list for a catalog.
///
/// Returns [`SequenceError::InvalidItemsPerPage`] when `items_per_page` is 0;
/// every other input, including an empty product list, is valid.
pub fn sequence_pages(
    products: &[Product],
    options: &SequenceOptions,
) -> Result<Vec<PageDescriptor>, SequenceError> {
    let per_page = options.items_per_page;
    if per_page == 0 {
        return Err(SequenceError::InvalidItemsPerPage(per_page));
    }

    let mut pages = Vec::new();

    if options.enable_cover_page {
        pages.push(PageDescriptor::Cover);
    }

    if options.enable_category_dividers {
        if !products.is_empty() {
            let groups = group_by_category(products, &options.uncategorized_label);
            for (index, (category_name, group)) in groups.into_iter().enumerate() {
                if wants_divider(index, options) {
                    pages.push(PageDescriptor::Divider {
                        first_product_image: group.first().and_then(|p| p.image_url.clone()),
                        category_name,
                    });
                }
                push_product_pages(&mut pages, &group, per_page);
            }
        }
    } else {
        for chunk in chunk_products(products, per_page)? {
            pages.push(PageDescriptor::Products {
                products: chunk.to_vec(),
            });
        }
        if products.is_empty() {
            pages.push(blank_page());
        }
    }

    if pages.is_empty() {
        pages.push(blank_page());
    }

    debug!(
        products = products.len(),
        pages = pages.len(),
        per_page,
        "sequenced catalog pages"
    );
    Ok(pages)
}

/// Sequence a scanned catalog using the options from its config.
pub fn sequence_catalog(manifest: &Manifest) -> Result<PageSequence, SequenceError> {
    let options = manifest.config.sequence_options();
    let pages = sequence_pages(&manifest.products, &options)?;
    Ok(PageSequence {
        items_per_page: options.items_per_page,
        pages,
    })
}

fn wants_divider(group_index: usize, options: &SequenceOptions) -> bool {
    match options.first_divider {
        FirstDividerPolicy::Always => true,
        FirstDividerPolicy::SkipAfterCover => group_index > 0 || !options.enable_cover_page,
    }
}

fn blank_page() -> PageDescriptor {
    PageDescriptor::Products {
        products: Vec::new(),
    }
}

fn push_product_pages(pages: &mut Vec<PageDescriptor>, products: &[&Product], per_page: usize) {
    for chunk in products.chunks(per_page) {
        pages.push(PageDescriptor::Products {
            products: chunk.iter().map(|p| (*p).clone()).collect(),
        });
    }
}

/// Group products by normalized category.
///
/// Categories keep first-seen order; products keep input order within their
/// category.
pub fn group_by_category<'a>(
    products: &'a [Product],
    uncategorized_label: &str,
) -> IndexMap<String, Vec<&'a Product>> {
    let mut groups: IndexMap<String, Vec<&'a Product>> = IndexMap::new();
    for product in products {
        let key = normalize_category(product.category.as_deref(), uncategorized_label);
        groups.entry(key).or_default().push(product);
    }
    groups
}

/// Split products into pages of at most `per_page`, preserving order.
///
/// An empty input yields no chunks.
pub fn chunk_products(
    products: &[Product],
    per_page: usize,
) -> Result<Vec<&[Product]>, SequenceError> {
    if per_page == 0 {
        return Err(SequenceError::InvalidItemsPerPage(per_page));
    }
    Ok(products.chunks(per_page).collect())
}
