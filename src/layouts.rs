//! Layout capacity registry.
//!
//! Every layout (template) decides how many products fit on one page. Some
//! layouts have a fixed capacity, others scale with the selected column
//! count:
//!
//! | Layout | Capacity |
//! |--------|----------|
//! | `modern-grid` | columns × 3 |
//! | `classic-catalog` | columns × 3 |
//! | `catalog-pro` | columns × 3 |
//! | `product-tiles` | columns × 4 |
//! | `minimalist` | columns × 2 |
//! | `bold` | 6 |
//! | `magazine` | 4 |
//! | `fashion-lookbook` | 4 |
//! | `elegant-list` | 8 |
//! | `showcase` | 2 |
//!
//! Entries in `[layouts.capacity]` of `catalog.toml` override or extend this
//! table. A layout id that is not registered anywhere falls back to
//! `columns × 3`; new layouts are often selected before their capacity is
//! known, so this is never an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Rows assumed for layouts without a registered capacity.
pub const DEFAULT_ROWS: usize = 3;

/// Upper bound for a configured capacity value (`fixed` or `per_column`).
pub const MAX_CAPACITY: usize = 1000;

/// How many products a layout fits on one page.
///
/// In TOML: `{ fixed = 6 }` or `{ per_column = 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    /// Same capacity at any column count.
    Fixed(usize),
    /// `columns * k` products per page.
    PerColumn(usize),
}

impl Capacity {
    /// Saturates instead of overflowing for out-of-range values.
    pub fn items_per_page(&self, columns: usize) -> usize {
        match *self {
            Capacity::Fixed(n) => n,
            Capacity::PerColumn(k) => columns.saturating_mul(k),
        }
    }

    /// The configured number, before any column scaling.
    pub fn value(&self) -> usize {
        match *self {
            Capacity::Fixed(n) | Capacity::PerColumn(n) => n,
        }
    }

    /// Human-readable description for listings.
    pub fn describe(&self) -> String {
        match self {
            Capacity::Fixed(n) => format!("{n} per page"),
            Capacity::PerColumn(k) => format!("columns x {k}"),
        }
    }
}

const BUILTIN: &[(&str, Capacity)] = &[
    ("modern-grid", Capacity::PerColumn(3)),
    ("classic-catalog", Capacity::PerColumn(3)),
    ("catalog-pro", Capacity::PerColumn(3)),
    ("product-tiles", Capacity::PerColumn(4)),
    ("minimalist", Capacity::PerColumn(2)),
    ("bold", Capacity::Fixed(6)),
    ("magazine", Capacity::Fixed(4)),
    ("fashion-lookbook", Capacity::Fixed(4)),
    ("elegant-list", Capacity::Fixed(8)),
    ("showcase", Capacity::Fixed(2)),
];

/// Where a capacity entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Builtin,
    Config,
    Fallback,
}

/// Lookup table from layout id to [`Capacity`].
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    entries: BTreeMap<String, (Capacity, Source)>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LayoutRegistry {
    /// Registry holding only the built-in layouts.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(id, cap)| (id.to_string(), (*cap, Source::Builtin)))
            .collect();
        Self { entries }
    }

    /// Layer config overrides on top of the current entries.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, Capacity>) -> Self {
        for (id, cap) in overrides {
            self.entries.insert(id.clone(), (*cap, Source::Config));
        }
        self
    }

    /// Capacity entry for a layout, or the fallback when it isn't registered.
    pub fn capacity(&self, layout: &str) -> (Capacity, Source) {
        match self.entries.get(layout) {
            Some(entry) => *entry,
            None => (Capacity::PerColumn(DEFAULT_ROWS), Source::Fallback),
        }
    }

    /// Items per page for `layout` at `columns` columns.
    pub fn items_per_page(&self, layout: &str, columns: usize) -> usize {
        let (capacity, source) = self.capacity(layout);
        if source == Source::Fallback {
            debug!(layout, columns, "no capacity registered for layout, using default");
        }
        capacity.items_per_page(columns)
    }

    /// All registered layouts, sorted by id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Capacity, Source)> {
        self.entries
            .iter()
            .map(|(id, (cap, source))| (id.as_str(), *cap, *source))
    }

    pub fn contains(&self, layout: &str) -> bool {
        self.entries.contains_key(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layout_ignores_columns() {
        let registry = LayoutRegistry::builtin();
        assert_eq!(registry.items_per_page("bold", 2), 6);
        assert_eq!(registry.items_per_page("bold", 4), 6);
    }

    #[test]
    fn per_column_layout_scales() {
        let registry = LayoutRegistry::builtin();
        assert_eq!(registry.items_per_page("modern-grid", 3), 9);
        assert_eq!(registry.items_per_page("modern-grid", 2), 6);
        assert_eq!(registry.items_per_page("product-tiles", 3), 12);
    }

    #[test]
    fn unknown_layout_falls_back_to_three_rows() {
        let registry = LayoutRegistry::builtin();
        assert_eq!(registry.items_per_page("not-yet-registered", 4), 12);
        assert_eq!(
            registry.capacity("not-yet-registered"),
            (Capacity::PerColumn(3), Source::Fallback)
        );
    }

    #[test]
    fn overrides_replace_builtin() {
        let mut overrides = BTreeMap::new();
        overrides.insert("bold".to_string(), Capacity::Fixed(8));
        let registry = LayoutRegistry::builtin().with_overrides(&overrides);
        assert_eq!(registry.items_per_page("bold", 2), 8);
        assert_eq!(registry.capacity("bold").1, Source::Config);
    }

    #[test]
    fn overrides_register_new_layouts() {
        let mut overrides = BTreeMap::new();
        overrides.insert("wide-grid".to_string(), Capacity::PerColumn(5));
        let registry = LayoutRegistry::builtin().with_overrides(&overrides);
        assert!(registry.contains("wide-grid"));
        assert_eq!(registry.items_per_page("wide-grid", 2), 10);
    }

    #[test]
    fn entries_are_sorted_by_id() {
        let registry = LayoutRegistry::builtin();
        let ids: Vec<&str> = registry.entries().map(|(id, _, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), BUILTIN.len());
    }

    #[test]
    fn capacity_parses_from_toml() {
        let table: BTreeMap<String, Capacity> = toml::from_str(
            r#"
bold = { fixed = 6 }
modern-grid = { per_column = 3 }
"#,
        )
        .unwrap();
        assert_eq!(table["bold"], Capacity::Fixed(6));
        assert_eq!(table["modern-grid"], Capacity::PerColumn(3));
    }

    #[test]
    fn describe_capacity() {
        assert_eq!(Capacity::Fixed(6).describe(), "6 per page");
        assert_eq!(Capacity::PerColumn(3).describe(), "columns x 3");
    }

    #[test]
    fn per_column_saturates_instead_of_overflowing() {
        let capacity = Capacity::PerColumn(usize::MAX);
        assert_eq!(capacity.items_per_page(3), usize::MAX);
    }

    #[test]
    fn capacity_value_ignores_columns() {
        assert_eq!(Capacity::Fixed(6).value(), 6);
        assert_eq!(Capacity::PerColumn(4).value(), 4);
    }
}
