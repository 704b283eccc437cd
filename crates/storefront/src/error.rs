//! Unified error handling for the storefront state model.
//!
//! No error here is fatal to a session. Every variant maps to a notification
//! severity and a user-facing message so callers can surface it through the
//! notification centre instead of propagating it further.

use showroom_core::{ProductId, Severity};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::contact::FieldErrors;

/// Storefront error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation referenced a product id the catalog does not have.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Add-to-cart against a product with zero stock.
    #[error("Product out of stock: {0}")]
    OutOfStock(ProductId),

    /// A non-positive quantity was requested.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The same simulated request is already in flight.
    #[error("Request already in progress")]
    Busy,

    /// The session was closed before the operation completed.
    #[error("Session closed")]
    Closed,

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Contact form failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

impl StoreError {
    /// Severity to use when surfacing this error as a notification.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::OutOfStock(_) | Self::InvalidQuantity(_) => Severity::Warning,
            Self::Busy => Severity::Info,
            Self::NotFound(_) | Self::Closed | Self::Catalog(_) | Self::Validation(_) => {
                Severity::Error
            }
        }
    }

    /// Message suitable for showing to a shopper.
    ///
    /// Catalog details are internal and are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "That product is no longer available".to_string(),
            Self::OutOfStock(_) => "Sorry, this product is out of stock".to_string(),
            Self::InvalidQuantity(_) => "Quantity must be at least 1".to_string(),
            Self::Busy => "Please wait for the current request to finish".to_string(),
            Self::Closed => "Your session has ended".to_string(),
            Self::Catalog(_) => "The catalog is unavailable right now".to_string(),
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
        }
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
