//! A single shopper's storefront session.
//!
//! [`Storefront`] ties the catalog, cart, wishlist, search history, contact
//! desk and notification centre together. Every mutation that the shopper
//! would see feedback for publishes a notification.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use showroom_core::{Price, Product, ProductId, Severity};
use tracing::{debug, info, instrument, warn};

use crate::cart::{Cart, CartLine, CartManager};
use crate::catalog::{Catalog, CatalogQuery, view};
use crate::config::StorefrontConfig;
use crate::contact::{ContactDesk, ContactForm, ContactReceipt};
use crate::error::{Result, StoreError};
use crate::notification::{Notification, NotificationCenter};
use crate::pricing::{OrderSummary, PromoOutcome};
use crate::search::{SearchHistory, quick_search};
use crate::wishlist::{Wishlist, WishlistChange};

/// Storefront session handle.
///
/// Cloning is cheap and every clone refers to the same session.
#[derive(Debug, Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

#[derive(Debug)]
struct StorefrontInner {
    config: StorefrontConfig,
    catalog: Catalog,
    state: Mutex<SessionState>,
    notifications: NotificationCenter,
    contact: ContactDesk,
    pending_adds: AtomicUsize,
    closed: AtomicBool,
}

#[derive(Debug)]
struct SessionState {
    cart: CartManager,
    wishlist: Wishlist,
    history: SearchHistory,
}

impl Storefront {
    /// Create a session over an already loaded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let cart = CartManager::new(catalog.currency_code(), config.pricing.clone());
        let notifications = NotificationCenter::new(config.notification_ttl);
        let contact = ContactDesk::new(config.contact_latency);

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                state: Mutex::new(SessionState {
                    cart,
                    wishlist: Wishlist::new(),
                    history: SearchHistory::new(),
                }),
                notifications,
                contact,
                pending_adds: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Create a session, loading the catalog named by the configuration or
    /// the built-in sample catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] if the catalog cannot be read or is
    /// invalid.
    pub async fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path).await?,
            None => Catalog::sample()?,
        };
        info!(products = catalog.len(), "Storefront session opened");
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the session configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the notification centre.
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// The notification currently showing, if any.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.inner.notifications.current()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn product(&self, product_id: ProductId) -> Result<&Product> {
        self.inner
            .catalog
            .get(product_id)
            .ok_or(StoreError::NotFound(product_id))
    }

    /// Publish an error as a notification and hand it back.
    fn report(&self, err: StoreError) -> StoreError {
        warn!(error = %err, "Storefront operation failed");
        self.inner
            .notifications
            .publish(err.user_message(), err.severity());
        err
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Filtered and sorted products for the product grid.
    #[must_use]
    pub fn view(&self, query: &CatalogQuery) -> Vec<&Product> {
        view(self.inner.catalog.products(), query)
    }

    /// Run a quick search and remember the term.
    #[instrument(skip(self))]
    pub fn quick_search(&self, query: &str) -> Vec<&Product> {
        let term = query.trim();
        self.state().history.record(term);
        quick_search(self.inner.catalog.products(), term)
    }

    /// Recent quick search terms, newest first.
    #[must_use]
    pub fn recent_searches(&self) -> Vec<String> {
        self.state().history.iter().map(str::to_string).collect()
    }

    pub fn clear_recent_searches(&self) {
        self.state().history.clear();
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of a product after the simulated request latency.
    ///
    /// The line's quantity is read when the request starts and the line is set
    /// to that plus `quantity` when it completes. Of two overlapping adds of
    /// the same product, the one that completes last wins. Returns the line's
    /// quantity afterwards.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] for an unknown product
    /// - [`StoreError::InvalidQuantity`] for a zero quantity
    /// - [`StoreError::OutOfStock`] when the product has no stock
    /// - [`StoreError::Closed`] when the session is closed before completion
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<u32> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        let product = self.product(product_id).map_err(|e| self.report(e))?;
        if quantity == 0 {
            return Err(self.report(StoreError::InvalidQuantity(0)));
        }
        if !product.is_in_stock() {
            return Err(self.report(StoreError::OutOfStock(product_id)));
        }

        let base = self.state().cart.line_quantity(product_id);
        {
            let _pending = PendingAdd::start(&self.inner.pending_adds);
            let latency = self.inner.config.add_to_cart_latency;
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
        }

        if self.is_closed() {
            debug!("Session closed while adding, discarding");
            return Err(StoreError::Closed);
        }

        let line_quantity = self.state().cart.settle_add(product, base, quantity)?;
        info!(base, quantity, line_quantity, "Added to cart");
        self.inner
            .notifications
            .publish(format!("Added {} to cart", product.name), Severity::Success);
        Ok(line_quantity)
    }

    /// True while any add-to-cart request is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.pending_adds.load(Ordering::Acquire) > 0
    }

    /// Remove a product's line from the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, product_id: ProductId) -> Option<CartLine> {
        let removed = self.state().cart.remove(product_id)?;
        info!("Removed from cart");
        self.inner.notifications.publish(
            format!("Removed {} from cart", removed.name),
            Severity::Info,
        );
        Some(removed)
    }

    /// Set a line's quantity. Quantities below 1 are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> bool {
        self.state().cart.update_quantity(product_id, quantity)
    }

    /// Type into the promo code field.
    pub fn enter_promo(&self, text: &str) {
        self.state().cart.enter_promo(text);
    }

    /// Apply the code currently in the promo field.
    #[instrument(skip(self))]
    pub fn apply_promo(&self) -> PromoOutcome {
        let outcome = self.state().cart.apply_promo();
        debug!(?outcome, "Promo code checked");
        outcome
    }

    /// Snapshot of the cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state().cart.cart().clone()
    }

    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.state().cart.summary()
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.state().cart.subtotal()
    }

    #[must_use]
    pub fn shipping_fee(&self) -> Price {
        self.state().cart.shipping_fee()
    }

    #[must_use]
    pub fn discount(&self) -> Price {
        self.state().cart.discount()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.state().cart.total()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.state().cart.line_count()
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add a product to the wishlist, or remove it if already there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown product.
    #[instrument(skip(self))]
    pub fn toggle_wishlist(&self, product_id: ProductId) -> Result<WishlistChange> {
        let product = self.product(product_id).map_err(|e| self.report(e))?;
        let change = self.state().wishlist.toggle(product_id);
        let (message, severity) = match change {
            WishlistChange::Added => (format!("Added {} to wishlist", product.name), Severity::Success),
            WishlistChange::Removed => {
                (format!("Removed {} from wishlist", product.name), Severity::Info)
            }
        };
        self.inner.notifications.publish(message, severity);
        Ok(change)
    }

    #[must_use]
    pub fn in_wishlist(&self, product_id: ProductId) -> bool {
        self.state().wishlist.contains(product_id)
    }

    /// Wishlisted product ids in the order they were added.
    #[must_use]
    pub fn wishlist(&self) -> Vec<ProductId> {
        self.state().wishlist.iter().collect()
    }

    // =========================================================================
    // Contact
    // =========================================================================

    /// Validate and submit the contact form.
    ///
    /// # Errors
    ///
    /// See [`ContactDesk::submit`].
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactReceipt> {
        let receipt = self.inner.contact.submit(form).await?;
        self.inner
            .notifications
            .publish("Thanks, your message has been sent", Severity::Success);
        Ok(receipt)
    }

    #[must_use]
    pub fn is_submitting_contact(&self) -> bool {
        self.inner.contact.is_submitting()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// End the session. Adds still in flight are discarded when they complete.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            info!("Storefront session closed");
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

/// Counts an add-to-cart as pending for as long as it is alive.
struct PendingAdd<'a>(&'a AtomicUsize);

impl<'a> PendingAdd<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for PendingAdd<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
