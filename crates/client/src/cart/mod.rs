//! Cart manager with write-through persistence.
//!
//! The cart is an ordered sequence of line items (insertion order), merged by
//! product ID. There is no state machine beyond the data itself: every
//! operation is a total function over the sequence, and every mutator ends
//! with an explicit [`CartManager::persist`] write-through - the persistence
//! step is a visible part of the contract, not a hidden observer.
//!
//! Persistence failures are logged and never surfaced; the in-memory cart is
//! the source of truth for the running process.

use rust_decimal::Decimal;

use starfruit_core::ProductId;

use crate::models::{CartItem, Product};
use crate::storage::{KeyValueStore, keys};

/// Shopping cart manager.
///
/// Constructed once at process start via [`CartManager::open`] and passed by
/// reference to every consumer.
pub struct CartManager<S> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Open the cart, loading any persisted content.
    ///
    /// Absent or malformed persisted content recovers to an empty cart; a
    /// corrupt blob is logged and discarded, never surfaced.
    #[must_use]
    pub fn open(store: S) -> Self {
        let items = store.get(keys::CART).map_or_else(Vec::new, |raw| {
            serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding malformed persisted cart: {e}");
                Vec::new()
            })
        });

        Self { store, items }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// An existing line with the same `id` has its quantity incremented
    /// (saturating at `u32::MAX`); a new product is appended with its image
    /// resolved from whichever of the two source fields is present. A
    /// `quantity` of zero is a no-op.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::from_product(product, quantity));
        }

        self.persist();
    }

    /// Set a line's quantity directly (no merge).
    ///
    /// A quantity of zero removes the line; an unknown `id` leaves the
    /// sequence untouched. The write-through still happens either way.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == *id) {
            item.quantity = quantity;
        }

        self.persist();
    }

    /// Remove a line by product ID.
    ///
    /// An unknown `id` leaves the sequence untouched; the write-through still
    /// happens either way.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.items.retain(|item| item.id != *id);
        self.persist();
    }

    /// Reset the cart to an empty sequence.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The key-value store this cart writes through to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the full item sequence through to the store.
    ///
    /// Called unconditionally by every mutator after the in-memory mutation
    /// settles, even when the sequence came out unchanged; this keeps the
    /// persisted blob in step with memory (and flushes out recovered
    /// corruption). A storage failure is logged, not raised: the next
    /// mutation retries the full write anyway.
    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::CART, &raw) {
            tracing::error!("failed to persist cart: {e}");
        }
    }
}
