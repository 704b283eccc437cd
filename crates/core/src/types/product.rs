//! Catalog product record.
//!
//! Products are read-only for the whole session. The JSON shape follows the
//! catalog data files (`camelCase` keys, `reviews` as the review count).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    pub name: String,
    /// Selling price in the catalog currency.
    pub price: Decimal,
    /// Pre-discount price. Absent or equal to `price` means no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    #[serde(alias = "reviews", default)]
    pub review_count: u32,
    #[serde(default)]
    pub description: String,
    /// Ordered color tokens. May be empty.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<String>,
}

/// Coarse stock indicator shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    /// Fewer than 5 units left.
    Low,
    /// Fewer than 10 units left.
    Limited,
    Plenty,
}

impl Product {
    /// Selling price as a [`Price`] in the given currency.
    #[must_use]
    pub const fn unit_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }

    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Percentage off the original price, rounded to the nearest whole percent.
    ///
    /// Returns `None` when there is no original price or the rounded discount
    /// is not positive.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= Decimal::ZERO {
            return None;
        }
        let percent = ((original - self.price) / original * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        percent.to_u32().filter(|p| *p > 0)
    }

    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        match self.stock {
            0 => StockLevel::OutOfStock,
            1..=4 => StockLevel::Low,
            5..=9 => StockLevel::Limited,
            _ => StockLevel::Plenty,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(price: i64, original: Option<i64>, stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Test".to_string(),
            price: Decimal::from(price),
            original_price: original.map(Decimal::from),
            category: "misc".to_string(),
            rating: 4.0,
            review_count: 0,
            description: String::new(),
            colors: Vec::new(),
            stock,
            images: Vec::new(),
            specs: Vec::new(),
        }
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(product(900, Some(1000), 1).discount_percent(), Some(10));
        assert_eq!(product(29_990, Some(34_900), 1).discount_percent(), Some(14));
        assert_eq!(product(1000, Some(1000), 1).discount_percent(), None);
        assert_eq!(product(1000, None, 1).discount_percent(), None);
    }

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(product(1, None, 0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(product(1, None, 4).stock_level(), StockLevel::Low);
        assert_eq!(product(1, None, 5).stock_level(), StockLevel::Limited);
        assert_eq!(product(1, None, 9).stock_level(), StockLevel::Limited);
        assert_eq!(product(1, None, 10).stock_level(), StockLevel::Plenty);
    }

    #[test]
    fn test_deserialize_catalog_shape() {
        let json = r#"{
            "id": 3,
            "name": "Wireless Earbuds",
            "price": 2490,
            "originalPrice": 2990,
            "category": "Audio",
            "rating": 4.6,
            "reviews": 218,
            "description": "Noise cancelling",
            "colors": ["black", "white"],
            "stock": 12
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::from(2490));
        assert_eq!(product.review_count, 218);
        assert_eq!(product.colors, vec!["black", "white"]);
        assert!(product.images.is_empty());
    }
}
