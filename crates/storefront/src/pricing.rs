//! Order totals and promo codes.
//!
//! Everything here is a pure function of the cart and promo state. Totals are
//! recomputed on every read and never cached.

use rust_decimal::Decimal;
use serde::Serialize;
use showroom_core::Price;
use thiserror::Error;

use crate::cart::Cart;

/// Default free-shipping threshold. Shipping is free only strictly above it.
pub const FREE_SHIPPING_THRESHOLD: i64 = 5000;
/// Default flat shipping fee charged at or below the threshold.
pub const FLAT_SHIPPING_FEE: i64 = 50;
/// Default promo code.
pub const PROMO_CODE: &str = "SAVE10";
/// Default promo discount rate (10%).
pub const PROMO_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Rules a [`PricingPolicy`] refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("promo rate {0} is outside [0, 1)")]
    PromoRate(Decimal),
    #[error("free shipping threshold {0} is negative")]
    NegativeThreshold(Decimal),
    #[error("flat shipping fee {0} is negative")]
    NegativeFee(Decimal),
}

/// Shipping and promo rules for a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    free_shipping_threshold: Decimal,
    flat_shipping_fee: Decimal,
    promo_code: String,
    /// Fraction of the subtotal taken off by the promo. Always in `[0, 1)`.
    promo_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(FREE_SHIPPING_THRESHOLD),
            flat_shipping_fee: Decimal::from(FLAT_SHIPPING_FEE),
            promo_code: PROMO_CODE.to_string(),
            promo_rate: PROMO_RATE,
        }
    }
}

impl PricingPolicy {
    /// Build a policy, checking that no total can go negative.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the promo rate is outside `[0, 1)` or
    /// either shipping amount is negative.
    pub fn new(
        free_shipping_threshold: Decimal,
        flat_shipping_fee: Decimal,
        promo_code: impl Into<String>,
        promo_rate: Decimal,
    ) -> Result<Self, PricingError> {
        if promo_rate < Decimal::ZERO || promo_rate >= Decimal::ONE {
            return Err(PricingError::PromoRate(promo_rate));
        }
        if free_shipping_threshold < Decimal::ZERO {
            return Err(PricingError::NegativeThreshold(free_shipping_threshold));
        }
        if flat_shipping_fee < Decimal::ZERO {
            return Err(PricingError::NegativeFee(flat_shipping_fee));
        }
        Ok(Self {
            free_shipping_threshold,
            flat_shipping_fee,
            promo_code: promo_code.into(),
            promo_rate,
        })
    }

    #[must_use]
    pub const fn free_shipping_threshold(&self) -> Decimal {
        self.free_shipping_threshold
    }

    #[must_use]
    pub const fn flat_shipping_fee(&self) -> Decimal {
        self.flat_shipping_fee
    }

    #[must_use]
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    #[must_use]
    pub const fn promo_rate(&self) -> Decimal {
        self.promo_rate
    }

    /// Shipping fee for a subtotal.
    #[must_use]
    pub fn shipping_fee(&self, subtotal: Price) -> Price {
        if subtotal.amount > self.free_shipping_threshold {
            Price::zero(subtotal.currency_code)
        } else {
            Price::new(self.flat_shipping_fee, subtotal.currency_code)
        }
    }

    /// Promo discount for a subtotal.
    #[must_use]
    pub fn discount(&self, subtotal: Price, promo: &PromoState) -> Price {
        if promo.is_applied() {
            subtotal.scaled(self.promo_rate)
        } else {
            Price::zero(subtotal.currency_code)
        }
    }
}

/// Result of trying to apply a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoOutcome {
    Applied,
    /// The code was valid but already in effect; nothing changed.
    AlreadyApplied,
    /// The code did not match; applied state is untouched.
    Rejected,
}

/// Promo code entry and whether a discount is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoState {
    entered: String,
    applied: bool,
}

impl PromoState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the code as typed. Input is upper-cased like the promo field does.
    pub fn enter(&mut self, text: &str) {
        self.entered = text.to_uppercase();
    }

    /// The code currently in the input field.
    #[must_use]
    pub fn entered(&self) -> &str {
        &self.entered
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.applied
    }

    /// Apply `code` if it exactly matches the policy's code.
    ///
    /// Applying is idempotent and a wrong code never clears an applied promo.
    pub fn apply(&mut self, code: &str, policy: &PricingPolicy) -> PromoOutcome {
        if code != policy.promo_code {
            return PromoOutcome::Rejected;
        }
        if self.applied {
            return PromoOutcome::AlreadyApplied;
        }
        self.applied = true;
        PromoOutcome::Applied
    }

    /// Apply whatever is in the input field.
    pub fn apply_entered(&mut self, policy: &PricingPolicy) -> PromoOutcome {
        let code = self.entered.clone();
        self.apply(&code, policy)
    }
}

/// Snapshot of every derived cart figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub discount: Price,
    pub total: Price,
    /// Distinct products in the cart.
    pub line_count: usize,
    /// Sum of quantities (the cart badge).
    pub item_count: u64,
    pub promo_applied: bool,
}

/// Derive the order summary for a cart.
///
/// `total = subtotal + shipping_fee - discount`, floored at zero.
#[must_use]
pub fn summarize(cart: &Cart, promo: &PromoState, policy: &PricingPolicy) -> OrderSummary {
    let subtotal = cart.subtotal();
    let shipping_fee = policy.shipping_fee(subtotal);
    let discount = policy.discount(subtotal, promo);
    OrderSummary {
        subtotal,
        shipping_fee,
        discount,
        total: (subtotal + shipping_fee - discount).non_negative(),
        line_count: cart.line_count(),
        item_count: cart.item_count(),
        promo_applied: promo.is_applied(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use showroom_core::CurrencyCode;

    use super::*;

    fn thb(units: i64) -> Price {
        Price::from_major(units, CurrencyCode::THB)
    }

    #[test]
    fn test_promo_rate_constant_is_ten_percent() {
        assert_eq!(PROMO_RATE, Decimal::new(10, 2));
    }

    #[test]
    fn test_shipping_threshold_is_exclusive() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping_fee(thb(0)), thb(50));
        assert_eq!(policy.shipping_fee(thb(5000)), thb(50));
        assert_eq!(policy.shipping_fee(thb(5001)), thb(0));
    }

    #[test]
    fn test_apply_promo_exact_match_only() {
        let policy = PricingPolicy::default();
        let mut promo = PromoState::new();
        assert_eq!(promo.apply("save10", &policy), PromoOutcome::Rejected);
        assert_eq!(promo.apply(" SAVE10", &policy), PromoOutcome::Rejected);
        assert!(!promo.is_applied());

        assert_eq!(promo.apply("SAVE10", &policy), PromoOutcome::Applied);
        assert_eq!(promo.apply("SAVE10", &policy), PromoOutcome::AlreadyApplied);
        assert_eq!(promo.apply("WRONG", &policy), PromoOutcome::Rejected);
        assert!(promo.is_applied());
    }

    #[test]
    fn test_entered_code_is_uppercased() {
        let policy = PricingPolicy::default();
        let mut promo = PromoState::new();
        promo.enter("save10");
        assert_eq!(promo.entered(), "SAVE10");
        assert_eq!(promo.apply_entered(&policy), PromoOutcome::Applied);
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = summarize(
            &Cart::new(CurrencyCode::THB),
            &PromoState::new(),
            &PricingPolicy::default(),
        );
        assert_eq!(summary.subtotal, thb(0));
        assert_eq!(summary.shipping_fee, thb(50));
        assert_eq!(summary.discount, thb(0));
        assert_eq!(summary.total, thb(50));
        assert_eq!(summary.line_count, 0);
    }

    #[test]
    fn test_policy_rejects_rates_that_could_go_negative() {
        for rate in [Decimal::ONE, Decimal::from(2), Decimal::new(-1, 1)] {
            assert_eq!(
                PricingPolicy::new(Decimal::from(5000), Decimal::from(50), "SAVE10", rate),
                Err(PricingError::PromoRate(rate))
            );
        }
        assert!(matches!(
            PricingPolicy::new(Decimal::from(-1), Decimal::from(50), "SAVE10", PROMO_RATE),
            Err(PricingError::NegativeThreshold(_))
        ));
        assert!(matches!(
            PricingPolicy::new(Decimal::from(5000), Decimal::from(-50), "SAVE10", PROMO_RATE),
            Err(PricingError::NegativeFee(_))
        ));

        let policy =
            PricingPolicy::new(Decimal::ZERO, Decimal::ZERO, "ALMOST", Decimal::new(99, 2)).unwrap();
        assert_eq!(policy.promo_code(), "ALMOST");
        assert_eq!(policy.promo_rate(), Decimal::new(99, 2));
    }

    #[test]
    fn test_total_never_negative() {
        let policy = PricingPolicy::default();
        let mut promo = PromoState::new();
        promo.apply("SAVE10", &policy);
        let summary = summarize(&Cart::new(CurrencyCode::THB), &promo, &policy);
        assert!(!summary.total.amount.is_sign_negative());
        assert_eq!(summary.total, summary.subtotal + summary.shipping_fee - summary.discount);
    }
}
