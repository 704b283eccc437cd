//! Integration tests for Showroom.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p showroom-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_pricing` - Cart totals, shipping and promo codes through a session
//! - `catalog_view` - Category filter, search and sort over a fixture catalog
//! - `notifications` - Notification lifetime with a paused clock
//! - `contact_form` - Contact form validation and submission
//!
//! Async tests run on a paused tokio clock, so simulated latencies cost no
//! wall-clock time.

#![cfg_attr(not(test), forbid(unsafe_code))]

use showroom_core::ProductId;
use showroom_storefront::{Catalog, Storefront, StorefrontConfig};

/// Small catalog with known prices for exact arithmetic.
pub const FIXTURE_CATALOG: &str = r#"[
  {"id": 1, "name": "Alpha Phone", "price": 1000, "category": "Phones", "rating": 4.2, "description": "Entry level phone", "colors": ["Red", "Blue"], "stock": 10},
  {"id": 2, "name": "beta Laptop", "price": 6000, "originalPrice": 7500, "category": "Computers", "rating": 4.8, "description": "Slim laptop with a bright screen", "stock": 3},
  {"id": 3, "name": "Gamma Cable", "price": 99.50, "category": "Accessories", "rating": 3.9, "description": "Braided USB-C cable", "stock": 100},
  {"id": 4, "name": "Delta Phone", "price": 1000, "category": "Phones", "rating": 4.8, "description": "Phone with a big battery", "stock": 0},
  {"id": 5, "name": "Epsilon Case", "price": 250, "category": "Accessories", "rating": 4.2, "description": "Protective phone case", "stock": 7}
]"#;

/// Parse the fixture catalog.
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
pub fn fixture_catalog() -> Catalog {
    Catalog::from_json(FIXTURE_CATALOG).expect("fixture catalog is valid")
}

/// A session over the fixture catalog with the given configuration.
#[must_use]
pub fn store_with(config: StorefrontConfig) -> Storefront {
    Storefront::new(config, fixture_catalog())
}

/// A session over the fixture catalog with no simulated latency.
#[must_use]
pub fn immediate_store() -> Storefront {
    store_with(StorefrontConfig::immediate())
}

/// Shorthand for a product id.
#[must_use]
pub const fn pid(id: i32) -> ProductId {
    ProductId::new(id)
}
