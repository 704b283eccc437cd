//! Filtered and sorted product views.
//!
//! [`view`] is a pure function of its inputs: category and search filters are
//! ANDed together, then the survivors are sorted with a stable sort so ties
//! keep their catalog order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use showroom_core::Product;

use super::ALL_CATEGORIES;

/// Category restriction for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a filter label. `"all"` disables filtering; anything else must
    /// match a product category exactly.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

/// Product ordering for a view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    NameAsc,
}

impl SortKey {
    /// Parse from a sort selector value. Unknown values fall back to [`SortKey::Default`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" | "price-low" => Self::PriceAsc,
            "price-desc" | "price-high" => Self::PriceDesc,
            "rating-desc" | "rating" => Self::RatingDesc,
            "name-asc" | "name" => Self::NameAsc,
            _ => Self::Default,
        }
    }

    /// Convert to the sort selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::RatingDesc => "rating-desc",
            Self::NameAsc => "name-asc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::RatingDesc => b.rating.total_cmp(&a.rating),
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

/// View parameters chosen in the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against name and description.
    /// Empty disables the search filter.
    pub search: String,
    pub sort: SortKey,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(category: &str, search: &str, sort: SortKey) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            search: search.to_string(),
            sort,
        }
    }
}

/// Derive the ordered product list for a query.
///
/// Returns an empty list, never an error, when nothing matches.
#[must_use]
pub fn view<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = query.search.to_lowercase();

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| query.category.matches(p))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect();

    if query.sort != SortKey::Default {
        matched.sort_by(|a, b| query.sort.compare(a, b));
    }

    matched
}

/// "Load more" window over a product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    visible: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Items shown before the first "load more".
    pub const INITIAL: usize = 6;
    /// Items added per "load more".
    pub const STEP: usize = 3;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible: Self::INITIAL,
        }
    }

    /// Reveal the next batch, never past `total`.
    pub fn load_more(&mut self, total: usize) {
        self.visible = (self.visible + Self::STEP).min(total);
    }

    /// Number of items currently shown out of `total`.
    #[must_use]
    pub fn visible(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Items still hidden behind "load more".
    #[must_use]
    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.visible)
    }

    /// The visible prefix of `items`.
    #[must_use]
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(..self.visible(items.len())).unwrap_or(items)
    }
}
