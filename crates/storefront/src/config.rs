//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOWROOM_CATALOG_PATH` - JSON catalog file (default: built-in sample catalog)
//! - `SHOWROOM_ADD_TO_CART_LATENCY_MS` - Simulated add-to-cart delay (default: 500)
//! - `SHOWROOM_CONTACT_LATENCY_MS` - Simulated contact submission delay (default: 2000)
//! - `SHOWROOM_NOTIFICATION_TTL_MS` - Notification lifetime (default: 3000)
//! - `SHOWROOM_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 5000)
//! - `SHOWROOM_FLAT_SHIPPING_FEE` - Shipping fee otherwise (default: 50)
//! - `SHOWROOM_PROMO_CODE` - Accepted promo code (default: SAVE10)
//! - `SHOWROOM_PROMO_RATE` - Promo discount as a fraction in `[0, 1)` (default: 0.10)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::contact::ContactDesk;
use crate::notification::NotificationCenter;
use crate::pricing::{
    FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, PROMO_CODE, PROMO_RATE, PricingError, PricingPolicy,
};

/// Default simulated add-to-cart latency.
pub const ADD_TO_CART_LATENCY: Duration = Duration::from_millis(500);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Catalog file to load instead of the built-in sample
    pub catalog_path: Option<PathBuf>,
    /// Delay before an add-to-cart takes effect
    pub add_to_cart_latency: Duration,
    /// Delay before a contact submission is acknowledged
    pub contact_latency: Duration,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
    /// Shipping and promo rules
    pub pricing: PricingPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            add_to_cart_latency: ADD_TO_CART_LATENCY,
            contact_latency: ContactDesk::DEFAULT_LATENCY,
            notification_ttl: NotificationCenter::DEFAULT_TTL,
            pricing: PricingPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let free_shipping_threshold = get_parsed::<_, Decimal>(&lookup, "SHOWROOM_FREE_SHIPPING_THRESHOLD")?
            .unwrap_or_else(|| Decimal::from(FREE_SHIPPING_THRESHOLD));
        let flat_shipping_fee = get_parsed::<_, Decimal>(&lookup, "SHOWROOM_FLAT_SHIPPING_FEE")?
            .unwrap_or_else(|| Decimal::from(FLAT_SHIPPING_FEE));
        let promo_rate = get_parsed::<_, Decimal>(&lookup, "SHOWROOM_PROMO_RATE")?.unwrap_or(PROMO_RATE);
        let promo_code = get_optional(&lookup, "SHOWROOM_PROMO_CODE")
            .map_or_else(|| PROMO_CODE.to_string(), |code| code.to_uppercase());

        let pricing =
            PricingPolicy::new(free_shipping_threshold, flat_shipping_fee, promo_code, promo_rate)
                .map_err(|e| {
                    let key = match e {
                        PricingError::PromoRate(_) => "SHOWROOM_PROMO_RATE",
                        PricingError::NegativeThreshold(_) => "SHOWROOM_FREE_SHIPPING_THRESHOLD",
                        PricingError::NegativeFee(_) => "SHOWROOM_FLAT_SHIPPING_FEE",
                    };
                    ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
                })?;

        Ok(Self {
            catalog_path: get_optional(&lookup, "SHOWROOM_CATALOG_PATH").map(PathBuf::from),
            add_to_cart_latency: get_millis(
                &lookup,
                "SHOWROOM_ADD_TO_CART_LATENCY_MS",
                ADD_TO_CART_LATENCY,
            )?,
            contact_latency: get_millis(
                &lookup,
                "SHOWROOM_CONTACT_LATENCY_MS",
                ContactDesk::DEFAULT_LATENCY,
            )?,
            notification_ttl: get_millis(
                &lookup,
                "SHOWROOM_NOTIFICATION_TTL_MS",
                NotificationCenter::DEFAULT_TTL,
            )?,
            pricing,
        })
    }

    /// Default rules with every simulated delay removed.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            add_to_cart_latency: Duration::ZERO,
            contact_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Get and parse an optional variable.
fn get_parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional(lookup, key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Get a millisecond duration with a default value.
fn get_millis<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(get_parsed::<F, u64>(lookup, key)?.map_or(default, Duration::from_millis))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.add_to_cart_latency, Duration::from_millis(500));
        assert_eq!(config.contact_latency, Duration::from_millis(2000));
        assert_eq!(config.notification_ttl, Duration::from_millis(3000));
        assert_eq!(config.pricing.promo_code(), "SAVE10");
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("SHOWROOM_CATALOG_PATH", "/tmp/products.json"),
            ("SHOWROOM_ADD_TO_CART_LATENCY_MS", "0"),
            ("SHOWROOM_FREE_SHIPPING_THRESHOLD", "1000.50"),
            ("SHOWROOM_PROMO_CODE", "welcome5"),
            ("SHOWROOM_PROMO_RATE", "0.05"),
        ]))
        .unwrap();

        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/products.json")));
        assert_eq!(config.add_to_cart_latency, Duration::ZERO);
        assert_eq!(config.pricing.free_shipping_threshold(), Decimal::new(100_050, 2));
        assert_eq!(config.pricing.promo_code(), "WELCOME5");
        assert_eq!(config.pricing.promo_rate(), Decimal::new(5, 2));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("SHOWROOM_NOTIFICATION_TTL_MS", "  ")]))
                .unwrap();
        assert_eq!(config.notification_ttl, NotificationCenter::DEFAULT_TTL);
    }

    #[test]
    fn test_invalid_number() {
        let err = StorefrontConfig::from_lookup(lookup(&[(
            "SHOWROOM_CONTACT_LATENCY_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("SHOWROOM_CONTACT_LATENCY_MS"));
    }

    #[test]
    fn test_promo_rate_range() {
        for rate in ["1", "1.5", "-0.1"] {
            let result = StorefrontConfig::from_lookup(lookup(&[("SHOWROOM_PROMO_RATE", rate)]));
            assert!(result.is_err(), "rate {rate} should be rejected");
        }
        let config =
            StorefrontConfig::from_lookup(lookup(&[("SHOWROOM_PROMO_RATE", "0")])).unwrap();
        assert_eq!(config.pricing.promo_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_fee_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup(&[("SHOWROOM_FLAT_SHIPPING_FEE", "-50")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOWROOM_FLAT_SHIPPING_FEE"));
    }

    #[test]
    fn test_rejected_policy_names_variable() {
        let err = StorefrontConfig::from_lookup(lookup(&[("SHOWROOM_PROMO_RATE", "2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOWROOM_PROMO_RATE"));

        let err = StorefrontConfig::from_lookup(lookup(&[(
            "SHOWROOM_FREE_SHIPPING_THRESHOLD",
            "-1",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar(key, _) if key == "SHOWROOM_FREE_SHIPPING_THRESHOLD"
        ));
    }

    #[test]
    fn test_immediate_has_no_latency() {
        let config = StorefrontConfig::immediate();
        assert!(config.add_to_cart_latency.is_zero());
        assert!(config.contact_latency.is_zero());
        assert_eq!(config.notification_ttl, NotificationCenter::DEFAULT_TTL);
    }
}
