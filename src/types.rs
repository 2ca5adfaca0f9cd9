//! Shared types used across all pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → sequence → generate)
//! and must be identical across all three modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product selected for the catalog.
///
/// Only `id`, `category` and `image_url` influence pagination. The display
/// fields are read by the renderer, and any other keys in the source JSON
/// are kept in `extra` and written back out unchanged. `price` is one of
/// those keys: it may be a number, a string or `null` depending on the
/// source, so it is read through [`Product::price`] and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw category. `None`, empty and whitespace-only values all land in the
    /// sentinel group (see [`crate::naming::normalize_category`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Product {
    /// Minimal product with only an id and a category.
    pub fn new(id: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: category.map(str::to_string),
            image_url: None,
            description: None,
            sku: None,
            extra: BTreeMap::new(),
        }
    }

    /// Raw `price` value, if the product has one.
    pub fn price(&self) -> Option<&serde_json::Value> {
        self.extra.get("price")
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

/// One page of the catalog.
///
/// Serialized with a `kind` tag:
///
/// ```json
/// {"kind": "cover"}
/// {"kind": "divider", "category_name": "Clothing", "first_product_image": null}
/// {"kind": "products", "products": [ ... ]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageDescriptor {
    Cover,
    Divider {
        category_name: String,
        first_product_image: Option<String>,
    },
    Products {
        products: Vec<Product>,
    },
}

impl PageDescriptor {
    pub fn is_cover(&self) -> bool {
        matches!(self, PageDescriptor::Cover)
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, PageDescriptor::Divider { .. })
    }

    /// Products on this page; empty for cover and divider pages.
    pub fn products(&self) -> &[Product] {
        match self {
            PageDescriptor::Products { products } => products,
            _ => &[],
        }
    }
}

/// Output of the sequence stage, consumed by the generate stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSequence {
    /// Capacity the pages were cut with.
    pub items_per_page: usize,
    pub pages: Vec<PageDescriptor>,
}

impl PageSequence {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of products across all product pages.
    pub fn product_count(&self) -> usize {
        self.pages.iter().map(|p| p.products().len()).sum()
    }
}
