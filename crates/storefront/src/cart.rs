//! Cart line items and the cart manager.
//!
//! A cart holds at most one line per product, in first-add order, and every
//! stored quantity is at least 1. [`CartManager`] pairs the cart with promo
//! state and exposes the derived totals.

use rust_decimal::Decimal;
use serde::Serialize;
use showroom_core::{CurrencyCode, Price, Product, ProductId};

use crate::error::{Result, StoreError};
use crate::pricing::{OrderSummary, PricingPolicy, PromoOutcome, PromoState, summarize};

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Product name at the time it was first added.
    pub name: String,
    /// Unit price at the time it was first added.
    pub unit_price: Price,
    quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency_code: CurrencyCode,
}

impl Cart {
    #[must_use]
    pub const fn new(currency_code: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            currency_code,
        }
    }

    /// Lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount: Decimal = self.lines.iter().map(|l| l.line_total().amount).sum();
        Price::new(amount, self.currency_code)
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Set a product's line to exactly `quantity`, appending it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuantity`] if `quantity` is zero.
    pub fn put(&mut self, product: &Product, quantity: u32) -> Result<u32> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(0));
        }
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.unit_price(self.currency_code),
                quantity,
            }),
        }
        Ok(quantity)
    }

    /// Remove a line. Returns it if it was present.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Set a line's quantity exactly.
    ///
    /// Returns `Ok(false)` when there is no line for the product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuantity`] if `quantity` is below 1 or does
    /// not fit a line quantity. The line is left untouched.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<bool> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(StoreError::InvalidQuantity(quantity))?;
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Cart plus promo state under one pricing policy.
#[derive(Debug, Clone)]
pub struct CartManager {
    cart: Cart,
    promo: PromoState,
    policy: PricingPolicy,
}

impl CartManager {
    #[must_use]
    pub fn new(currency_code: CurrencyCode, policy: PricingPolicy) -> Self {
        Self {
            cart: Cart::new(currency_code),
            promo: PromoState::new(),
            policy,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn promo(&self) -> &PromoState {
        &self.promo
    }

    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Finish an add that started when the line held `base` units.
    ///
    /// The line becomes `base + quantity` whatever it holds now, so of two
    /// overlapping adds the one that finishes last wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuantity`] if `quantity` is zero.
    pub fn settle_add(&mut self, product: &Product, base: u32, quantity: u32) -> Result<u32> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(0));
        }
        self.cart.put(product, base.saturating_add(quantity))
    }

    /// Current quantity of a product's line, 0 when absent.
    #[must_use]
    pub fn line_quantity(&self, product_id: ProductId) -> u32 {
        self.cart.line(product_id).map_or(0, CartLine::quantity)
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        self.cart.remove(product_id)
    }

    /// Set a line's quantity, ignoring requests below 1.
    ///
    /// Returns true if a line changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        match self.cart.set_quantity(product_id, quantity) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::debug!(%product_id, error = %err, "Ignoring quantity update");
                false
            }
        }
    }

    pub fn enter_promo(&mut self, text: &str) {
        self.promo.enter(text);
    }

    /// Apply the code currently in the promo field.
    pub fn apply_promo(&mut self) -> PromoOutcome {
        self.promo.apply_entered(&self.policy)
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn shipping_fee(&self) -> Price {
        self.policy.shipping_fee(self.subtotal())
    }

    #[must_use]
    pub fn discount(&self) -> Price {
        self.policy.discount(self.subtotal(), &self.promo)
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.summary().total
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        summarize(&self.cart, &self.promo, &self.policy)
    }

    /// Empty the cart and forget any promo.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.promo = PromoState::new();
    }
}

/// Colour and quantity picked on a product's detail panel before adding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection {
    product_id: ProductId,
    colors: Vec<String>,
    color: Option<String>,
    quantity: u32,
    max_quantity: u32,
}

impl ProductSelection {
    /// Start a selection with the first colour and a quantity of one.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            colors: product.colors.clone(),
            color: product.colors.first().cloned(),
            quantity: 1,
            max_quantity: product.stock.max(1),
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Pick one of the product's colours. Unknown colours are ignored.
    pub fn select_color(&mut self, color: &str) -> bool {
        if !self.colors.iter().any(|c| c == color) {
            return false;
        }
        self.color = Some(color.to_string());
        true
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity, clamped to `1..=stock`.
    pub fn set_quantity(&mut self, quantity: i64) {
        let clamped = quantity.clamp(1, i64::from(self.max_quantity));
        self.quantity = u32::try_from(clamped).unwrap_or(1);
    }

    pub fn increment(&mut self) {
        self.quantity = (self.quantity + 1).min(self.max_quantity);
    }

    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }
}
