//! Catalog directory loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads a catalog directory and produces the
//! manifest the sequence stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! catalog/
//! ├── catalog.toml     # Catalog configuration (optional)
//! └── products.json    # Selected products, in display order
//! ```
//!
//! `products.json` is a JSON array. Each product needs an `id`; `name`,
//! `category`, `image_url`, `description` and `sku` are understood, and
//! anything else (including `price`, in whatever form) is carried through
//! untouched:
//!
//! ```json
//! [
//!   {"id": "p-1", "name": "Desk Lamp", "category": "Lighting", "price": 39.0},
//!   {"id": "p-2", "name": "Gift Card", "category": null}
//! ]
//! ```
//!
//! ## Validation
//!
//! - `products.json` must exist (an empty array is fine)
//! - Every entry must have a string `id`
//! - Duplicate ids are reported as warnings, not errors

use crate::config::{self, CatalogConfig};
use crate::types::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Products file looked up in the catalog directory.
pub const PRODUCTS_FILE: &str = "products.json";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid products file {0}: {1}")]
    Json(PathBuf, serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Products file not found: {0}")]
    MissingProducts(PathBuf),
}

/// Manifest output from the scan stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub products: Vec<Product>,
    pub config: CatalogConfig,
}

impl Manifest {
    /// Product counts per normalized category, in first-seen order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        crate::sequence::group_by_category(&self.products, &self.config.pages.uncategorized_label)
            .into_iter()
            .map(|(name, group)| (name, group.len()))
            .collect()
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let products = load_products(&root.join(PRODUCTS_FILE))?;

    for id in duplicate_ids(&products) {
        warn!(id, "duplicate product id");
    }
    info!(products = products.len(), "scanned catalog");

    Ok(Manifest { products, config })
}

/// Read a products file.
pub fn load_products(path: &Path) -> Result<Vec<Product>, ScanError> {
    if !path.exists() {
        return Err(ScanError::MissingProducts(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ScanError::Json(path.to_path_buf(), e))
}

/// Ids that occur more than once, each reported once, in first-repeat order.
fn duplicate_ids(products: &[Product]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for product in products {
        let id = product.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            dups.push(id);
        }
    }
    dups
}
