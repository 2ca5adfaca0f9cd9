//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `catalog.toml`. Stock defaults are
//! overridden by the values in the catalog directory's `catalog.toml`; the file
//! is optional and sparse.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [catalog]
//! title = "Product Catalog"
//! description = ""              # Markdown, shown on the cover page
//! cover_image = ""              # Hero image URL for the cover page
//!
//! [pages]
//! enable_cover_page = true
//! enable_category_dividers = false
//! first_divider = "skip-after-cover"   # or "always"
//! uncategorized_label = "Uncategorized"
//!
//! [layout]
//! template = "modern-grid"      # Layout id, resolves items per page
//! columns = 3                   # 1-6
//!
//! [layouts.capacity]            # Per-layout capacity overrides (1-1000)
//! # bold = { fixed = 6 }
//! # wide-grid = { per_column = 4 }
//!
//! [colors]
//! background = "#ffffff"
//! text = "#111111"
//! muted = "#6b7280"             # Prices, SKUs, page numbers
//! accent = "#2563eb"            # Divider pages, cover rule
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::layouts::{Capacity, LayoutRegistry, MAX_CAPACITY};
use crate::naming;
use crate::sequence::{FirstDividerPolicy, SequenceOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file name looked up in the catalog directory.
pub const CONFIG_FILE: &str = "catalog.toml";

/// Upper bound for `layout.columns`.
pub const MAX_COLUMNS: usize = 6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Cover page content.
    pub catalog: CatalogInfo,
    /// Page sequencing toggles.
    pub pages: PagesConfig,
    /// Selected layout and column count.
    pub layout: LayoutConfig,
    /// Capacity overrides for the layout registry.
    pub layouts: LayoutsConfig,
    /// Colors used by the HTML renderer.
    pub colors: ColorConfig,
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.columns == 0 || self.layout.columns > MAX_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "layout.columns must be 1-{MAX_COLUMNS}"
            )));
        }
        if self.layout.template.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.template must not be empty".into(),
            ));
        }
        if self.pages.uncategorized_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pages.uncategorized_label must not be empty".into(),
            ));
        }
        for (id, capacity) in &self.layouts.capacity {
            let n = capacity.value();
            if n == 0 || n > MAX_CAPACITY {
                return Err(ConfigError::Validation(format!(
                    "layouts.capacity.{id} must be 1-{MAX_CAPACITY}, got {n}"
                )));
            }
        }
        Ok(())
    }

    /// Layout registry with this config's overrides applied.
    pub fn registry(&self) -> LayoutRegistry {
        LayoutRegistry::builtin().with_overrides(&self.layouts.capacity)
    }

    /// Items per page for the selected layout and column count.
    pub fn items_per_page(&self) -> usize {
        self.registry()
            .items_per_page(&self.layout.template, self.layout.columns)
    }

    /// Sequencer options derived from `[pages]` and `[layout]`.
    pub fn sequence_options(&self) -> SequenceOptions {
        SequenceOptions::new(self.items_per_page())
            .with_cover_page(self.pages.enable_cover_page)
            .with_category_dividers(self.pages.enable_category_dividers)
            .with_first_divider(self.pages.first_divider)
            .with_uncategorized_label(self.pages.uncategorized_label.clone())
    }
}

/// Cover page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogInfo {
    pub title: String,
    /// Markdown rendered under the title on the cover page.
    pub description: String,
    /// Hero image URL. Empty means no image.
    pub cover_image: String,
}

impl Default for CatalogInfo {
    fn default() -> Self {
        Self {
            title: "Product Catalog".to_string(),
            description: String::new(),
            cover_image: String::new(),
        }
    }
}

/// Page sequencing toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub enable_cover_page: bool,
    pub enable_category_dividers: bool,
    /// Whether the first category gets a divider right after the cover.
    pub first_divider: FirstDividerPolicy,
    /// Label for products without a category.
    pub uncategorized_label: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            enable_cover_page: true,
            enable_category_dividers: false,
            first_divider: FirstDividerPolicy::default(),
            uncategorized_label: naming::DEFAULT_UNCATEGORIZED_LABEL.to_string(),
        }
    }
}

/// Selected layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Layout id looked up in the capacity registry.
    pub template: String,
    /// Product grid columns.
    pub columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            template: "modern-grid".to_string(),
            columns: 3,
        }
    }
}

/// Capacity overrides, keyed by layout id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutsConfig {
    pub capacity: BTreeMap<String, Capacity>,
}

/// Renderer colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text (prices, SKUs, page numbers).
    pub muted: String,
    /// Divider pages and cover accents.
    pub accent: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            muted: "#6b7280".to_string(),
            accent: "#2563eb".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(CatalogConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `catalog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if there is no `catalog.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CatalogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `catalog.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<CatalogConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `catalog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Catalog Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to products.json in the catalog directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Cover page
# ---------------------------------------------------------------------------
[catalog]
title = "Product Catalog"

# Markdown shown under the title on the cover page.
description = ""

# Hero image URL for the cover page. Leave empty for none.
cover_image = ""

# ---------------------------------------------------------------------------
# Page sequence
# ---------------------------------------------------------------------------
[pages]
# Start the catalog with a cover page.
enable_cover_page = true

# Group products by category and open each group with a divider page.
enable_category_dividers = false

# Divider for the first category when a cover page precedes it:
#   "skip-after-cover" -> the cover introduces the first category
#   "always"           -> every category gets a divider
first_divider = "skip-after-cover"

# Category label for products without one.
uncategorized_label = "Uncategorized"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Layout id. Decides how many products fit on one page.
# Run `simple-catalog layouts` to list the known ids.
template = "modern-grid"

# Product grid columns (1-6).
columns = 3

# Capacity overrides, keyed by layout id (values 1-1000).
# Unknown layouts use columns x 3.
[layouts.capacity]
# bold = { fixed = 6 }
# wide-grid = { per_column = 4 }

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#ffffff"
text = "#111111"
muted = "#6b7280"      # Prices, SKUs, page numbers
accent = "#2563eb"     # Divider pages, cover rule
"##
}

/// Generate CSS custom properties from color and layout config.
pub fn generate_theme_css(colors: &ColorConfig, layout: &LayoutConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-muted: {muted};
    --color-accent: {accent};
    --grid-columns: {columns};
}}"#,
        background = colors.background,
        text = colors.text,
        muted = colors.muted,
        accent = colors.accent,
        columns = layout.columns,
    )
}
