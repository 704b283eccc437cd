//! Showroom Core - Shared types library.
//!
//! This crate provides common types used across all Showroom components:
//! - `storefront` - Catalog, cart, wishlist and notification state model
//! - `cli` - Command-line tools for browsing the catalog and running sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, products and severities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
