//! Quick search overlay.
//!
//! Unlike the product grid filter, quick search matches against the product
//! name or its category, and remembers the last few submitted terms.

use std::collections::VecDeque;

use showroom_core::Product;

/// Suggested searches shown before the user types anything.
pub const POPULAR_SEARCHES: &[&str] = &["smartphone", "laptop", "headphones", "tablet", "accessories"];

/// Products whose name or category contains `query`, case-insensitively.
///
/// An empty query yields no results.
#[must_use]
pub fn quick_search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Recently submitted search terms, newest first.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    terms: VecDeque<String>,
}

impl SearchHistory {
    /// Maximum number of remembered terms.
    pub const CAPACITY: usize = 5;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a submitted term.
    ///
    /// Blank terms are ignored. A repeated term moves to the front instead of
    /// appearing twice. The oldest term is dropped past [`Self::CAPACITY`].
    pub fn record(&mut self, term: &str) {
        if term.trim().is_empty() {
            return;
        }
        self.terms.retain(|t| t != term);
        self.terms.push_front(term.to_string());
        self.terms.truncate(Self::CAPACITY);
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::catalog::Catalog;

    use super::*;

    #[test]
    fn test_quick_search_matches_name_or_category() {
        let catalog = Catalog::sample().unwrap();
        let by_category = quick_search(catalog.products(), "laptops");
        assert!(!by_category.is_empty());
        assert!(by_category.iter().all(|p| p.category == "Laptops"));

        let by_name = quick_search(catalog.products(), "POWERCORE");
        assert_eq!(by_name.len(), 1);
    }

    #[test]
    fn test_quick_search_ignores_description() {
        let catalog = Catalog::sample().unwrap();
        assert!(quick_search(catalog.products(), "noise cancelling").is_empty());
    }

    #[test]
    fn test_quick_search_empty_query() {
        let catalog = Catalog::sample().unwrap();
        assert!(quick_search(catalog.products(), "").is_empty());
    }

    #[test]
    fn test_history_dedupes_and_caps() {
        let mut history = SearchHistory::new();
        for term in ["a", "b", "c", "d", "e", "f"] {
            history.record(term);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["f", "e", "d", "c", "b"]);

        history.record("d");
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["d", "f", "e", "c", "b"]);
    }

    #[test]
    fn test_history_ignores_blank() {
        let mut history = SearchHistory::new();
        history.record("   ");
        history.record("");
        assert!(history.is_empty());
    }
}
