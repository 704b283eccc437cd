//! Read-only product catalog.
//!
//! The catalog is loaded once at startup, from a JSON file or the bundled
//! sample data, and never changes afterwards. Stock is informational only:
//! adding to the cart does not decrement it.

mod view;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use showroom_core::{CurrencyCode, Price, Product, ProductId};
use tracing::{debug, instrument};

pub use view::{CatalogQuery, CategoryFilter, Pager, SortKey, view};

/// Bundled sample catalog.
const SAMPLE_CATALOG: &str = include_str!("../../data/products.json");

/// Category label that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} has an original price below its selling price")]
    OriginalBelowPrice(ProductId),
    #[error("product {id} has rating {rating} outside 0.0-5.0")]
    RatingOutOfRange { id: ProductId, rating: f64 },
}

/// The authoritative, immutable product list.
///
/// Cheaply cloneable; clones share the same product storage.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    currency_code: CurrencyCode,
}

/// Summary figures shown under the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub in_stock: usize,
    pub min_price: Option<Price>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if ids repeat, prices are negative, an
    /// original price sits below the selling price, or a rating is out of range.
    pub fn new(products: Vec<Product>, currency_code: CurrencyCode) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product
                .original_price
                .is_some_and(|original| original < product.price)
            {
                return Err(CatalogError::OriginalBelowPrice(product.id));
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id,
                    rating: product.rating,
                });
            }
        }

        Ok(Self {
            products: products.into(),
            currency_code,
        })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products, CurrencyCode::default())
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::from_json(&json)?;
        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The sample catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled data fails validation.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Category filter labels: `"all"` first, then each category in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for product in self.products.iter() {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }

    /// Number of products in each category, in first-seen order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for product in self.products.iter() {
            match counts.iter_mut().find(|(c, _)| *c == product.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((product.category.as_str(), 1)),
            }
        }
        counts
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.products.len(),
            in_stock: self.products.iter().filter(|p| p.is_in_stock()).count(),
            min_price: self
                .products
                .iter()
                .map(|p| p.price)
                .min()
                .map(|amount| Price::new(amount, self.currency_code)),
        }
    }
}
