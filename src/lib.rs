//! # Simple Catalog
//!
//! Turns an ordered list of selected products into a paginated, printable
//! product catalog: an optional cover page, optional category divider pages,
//! and A4 product pages sized to the selected layout.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      catalog/  →  manifest.json   (catalog.toml + products.json)
//! 2. Sequence  manifest  →  pages.json      (ordered page descriptors)
//! 3. Generate  pages     →  dist/           (HTML catalog + single pages)
//! ```
//!
//! Each stage writes human-readable JSON the next stage reads, so any stage
//! can be inspected or re-run on its own. The sequence stage is a pure
//! function of the manifest; the other two stages only do I/O around it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — loads products and config into the manifest |
//! | [`sequence`] | Stage 2 — cover / divider / products page sequencing |
//! | [`generate`] | Stage 3 — renders the page sequence to HTML using Maud |
//! | [`layouts`] | Layout id → items-per-page registry |
//! | [`navigation`] | Current-page clamping for page-at-a-time views |
//! | [`config`] | `catalog.toml` loading, validation, merging, and CSS variables |
//! | [`types`] | Shared types serialized between stages (`Product`, `PageDescriptor`) |
//! | [`naming`] | Category normalization and slugs |
//! | [`output`] | CLI output formatting for every stage |
//!
//! # Design Decisions
//!
//! ## One Sequence, Every View
//!
//! The page-at-a-time preview and the full catalog are rendered from the same
//! `pages.json`. Pagination is decided once; renderers never re-slice products.
//!
//! ## First Divider After the Cover
//!
//! With both a cover page and category dividers, the first category's divider
//! is skipped by default since the cover already opens the catalog. Set
//! `pages.first_divider = "always"` to give every category a divider.
//!
//! ## Unknown Layouts Are Not Errors
//!
//! A layout id without a registered capacity gets `columns × 3` products per
//! page. Capacities can be added or overridden in `catalog.toml` without a
//! rebuild.

pub mod config;
pub mod generate;
pub mod layouts;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod scan;
pub mod sequence;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
