//! Cart simulation command.

use std::str::FromStr;

use showroom_core::ProductId;
use showroom_storefront::{PromoOutcome, Storefront};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// A product id with an optional quantity, written `ID` or `ID:QTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl FromStr for CartItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s.split_once(':').unwrap_or((s, "1"));
        let product_id = id
            .parse::<ProductId>()
            .map_err(|e| format!("invalid product id '{id}': {e}"))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// Add every item concurrently, apply the promo code and log the summary.
///
/// # Errors
///
/// Returns an error if any item could not be added.
pub async fn checkout(
    store: &Storefront,
    items: &[CartItem],
    promo: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut adds = JoinSet::new();
    for item in items.iter().copied() {
        let store = store.clone();
        adds.spawn(async move { store.add_to_cart(item.product_id, item.quantity).await });
    }
    while let Some(result) = adds.join_next().await {
        result??;
    }

    if let Some(code) = promo {
        store.enter_promo(code);
        match store.apply_promo() {
            PromoOutcome::Applied | PromoOutcome::AlreadyApplied => info!("Promo code applied"),
            PromoOutcome::Rejected => warn!(code, "Promo code not recognised"),
        }
    }

    let cart = store.cart();
    for line in cart.lines() {
        info!(
            "#{} {} x{} = {}",
            line.product_id,
            line.name,
            line.quantity(),
            line.line_total().display()
        );
    }

    let summary = store.summary();
    info!(
        lines = summary.line_count,
        items = summary.item_count,
        "Subtotal {}",
        summary.subtotal.display()
    );
    if summary.shipping_fee.is_zero() {
        info!("Shipping free");
    } else {
        info!("Shipping {}", summary.shipping_fee.display());
    }
    if summary.promo_applied {
        info!("Discount -{}", summary.discount.display());
    }
    info!("Total {}", summary.total.display());
    Ok(())
}
