//! Showroom storefront state model.
//!
//! Catalog browsing, a cart with promo pricing, a wishlist, a single-slot
//! notification centre and contact form handling for one shopper session.
//! [`Storefront`] is the entry point that ties them together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod notification;
pub mod pricing;
pub mod search;
pub mod session;
pub mod wishlist;

pub use cart::{Cart, CartLine, CartManager, ProductSelection};
pub use catalog::{Catalog, CatalogError, CatalogQuery, CategoryFilter, Pager, SortKey};
pub use config::{ConfigError, StorefrontConfig};
pub use contact::{ContactField, ContactForm, ContactReceipt, FieldErrors, ValidContact};
pub use error::{Result, StoreError};
pub use notification::{Notification, NotificationCenter};
pub use pricing::{OrderSummary, PricingError, PricingPolicy, PromoOutcome, PromoState};
pub use session::Storefront;
pub use wishlist::{Wishlist, WishlistChange};
