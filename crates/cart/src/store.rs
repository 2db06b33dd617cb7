//! The cart store.
//!
//! # Mutation model
//!
//! Every operation first computes the complete new cart (awaiting any catalog
//! reads), then commits it: the new cart is written to the persistence slot
//! and only after that write succeeds does it replace the in-memory snapshot.
//! A failure anywhere leaves both the snapshot and the slot as they were.
//!
//! Operations take `&mut self`, so one store has at most one mutation in
//! flight. Catalog awaits all happen before the commit, which means dropping
//! an in-flight operation future discards it without touching the cart.
//!
//! # Outcomes
//!
//! | Situation | Result |
//! |---|---|
//! | quantity above stock | "requested quantity unavailable" |
//! | remove of a product not in the cart | "failed to remove product" |
//! | update of a product not in the cart | silent no-op |
//! | update to a non-positive amount | silent no-op, no catalog read |
//! | catalog or storage fault | operation-specific failure message |

use std::sync::Arc;

use rocketshoes_core::{CartItem, CurrencyCode, ProductId};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, Operation};
use crate::notify::{Notification, Notifier};
use crate::storage::{CartSlot, KeyValueStorage};
use crate::summary::{CartSummary, SummaryError};

/// In-memory cart mirrored to a persistence slot.
pub struct CartStore<C, S, N> {
    catalog: C,
    slot: CartSlot<S>,
    notifier: N,
    items: Arc<[CartItem]>,
    revision: u64,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: Catalog,
    S: KeyValueStorage,
    N: Notifier,
{
    /// Create a store initialized from whatever `slot` holds.
    pub fn new(catalog: C, slot: CartSlot<S>, notifier: N) -> Self {
        let items: Arc<[CartItem]> = slot.load().into();
        info!(key = %slot.key(), lines = items.len(), "Cart store initialized");

        Self {
            catalog,
            slot,
            notifier,
            items,
            revision: 0,
        }
    }

    /// Current cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.items
    }

    /// Shared handle to the current cart.
    ///
    /// Each successful mutation replaces the snapshot, so `Arc::ptr_eq` on two
    /// snapshots tells whether the cart changed in between.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[CartItem]> {
        Arc::clone(&self.items)
    }

    /// Number of successful mutations since construction.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Line totals and subtotal in `currency`.
    ///
    /// # Errors
    ///
    /// Returns error if the totals overflow.
    pub fn summary(&self, currency: CurrencyCode) -> Result<CartSummary, SummaryError> {
        CartSummary::new(&self.items, currency)
    }

    /// Add one unit of a product, appending it if it is not in the cart yet.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product(&mut self, id: ProductId) {
        let planned = self.plan_add(id).await;
        let result = planned.and_then(|items| self.commit(items));

        if let Err(e) = result {
            self.report(Operation::Add, &e);
        }
    }

    /// Remove a product line entirely.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_product(&mut self, id: ProductId) {
        let result = self.plan_remove(id).and_then(|items| self.commit(items));

        if let Err(e) = result {
            self.report(Operation::Remove, &e);
        }
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Non-positive amounts and products not in the cart are ignored without
    /// notification.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_product_amount(&mut self, id: ProductId, amount: i64) {
        let planned = self.plan_update(id, amount).await;
        let result = match planned {
            Ok(Some(items)) => self.commit(items),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            self.report(Operation::UpdateAmount, &e);
        }
    }

    /// Empty the cart and delete the slot.
    ///
    /// # Errors
    ///
    /// Returns error if the slot cannot be deleted; the cart is unchanged then.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.slot.clear()?;
        self.publish(Vec::new());
        info!("Cart cleared");
        Ok(())
    }

    // =========================================================================
    // Planning
    // =========================================================================

    async fn plan_add(&self, id: ProductId) -> Result<Vec<CartItem>, CartError> {
        let stock = self.catalog.fetch_stock(id).await?;

        if let Some(existing) = self.find(id) {
            if existing.amount >= stock.amount {
                return Err(CartError::OutOfStock {
                    id,
                    requested: u64::from(existing.amount) + 1,
                    available: stock.amount,
                });
            }

            let mut items = self.items.to_vec();
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.amount += 1;
            }
            return Ok(items);
        }

        let product = self.catalog.fetch_product(id).await?;

        if stock.amount < 1 {
            return Err(CartError::OutOfStock {
                id,
                requested: 1,
                available: stock.amount,
            });
        }

        let mut items = self.items.to_vec();
        items.push(CartItem::from_product(product, 1));
        Ok(items)
    }

    fn plan_remove(&self, id: ProductId) -> Result<Vec<CartItem>, CartError> {
        if self.find(id).is_none() {
            return Err(CartError::NotInCart(id));
        }

        Ok(self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect())
    }

    async fn plan_update(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<Option<Vec<CartItem>>, CartError> {
        if amount <= 0 {
            debug!(amount, "Ignoring non-positive amount");
            return Ok(None);
        }

        let stock = self.catalog.fetch_stock(id).await?;

        if self.find(id).is_none() {
            debug!("Product not in cart, nothing to update");
            return Ok(None);
        }

        let requested = amount.unsigned_abs();
        let amount = match u32::try_from(amount) {
            Ok(amount) if amount <= stock.amount => amount,
            _ => {
                return Err(CartError::OutOfStock {
                    id,
                    requested,
                    available: stock.amount,
                });
            }
        };

        let mut items = self.items.to_vec();
        for item in items.iter_mut().filter(|item| item.id == id) {
            item.amount = amount;
        }
        Ok(Some(items))
    }

    // =========================================================================
    // Commit
    // =========================================================================

    fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Persist `items`, then make them the current cart.
    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        self.slot.save(&items)?;
        self.publish(items);
        Ok(())
    }

    fn publish(&mut self, items: Vec<CartItem>) {
        self.items = items.into();
        self.revision += 1;
        debug!(
            revision = self.revision,
            lines = self.items.len(),
            "Published cart"
        );
    }

    fn report(&self, operation: Operation, error: &CartError) {
        let message = operation.message_for(error);
        let notification = if error.is_rejection() {
            warn!(%operation, error = %error, "Cart operation rejected");
            Notification::warning(message)
        } else {
            tracing::error!(%operation, error = %error, "Cart operation failed");
            Notification::error(message)
        };

        self.notifier.notify(notification);
    }
}

impl<C, S, N> std::fmt::Debug for CartStore<C, S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
