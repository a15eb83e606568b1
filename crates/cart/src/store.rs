//! The cart session store.
//!
//! [`CartStore`] owns the authoritative in-memory cart for one shopping
//! session. It loads the initial cart from persistence at construction and
//! writes the whole cart back after every successful mutation. Stock and
//! catalog are consulted fresh on every operation; nothing is cached, so the
//! availability observed during a mutation is current availability.
//!
//! Mutations take `&mut self`, which makes the borrow checker serialize
//! operations within a session. A session shared across tasks needs
//! caller-provided mutual exclusion (e.g. `tokio::sync::Mutex<CartStore<..>>`);
//! the store imposes no internal locking.

use std::sync::Arc;

use tracing::instrument;

use shoebox_core::{Cart, CartItem, ProductId};

use crate::api::{ApiError, ProductCatalog, StockService};
use crate::error::{CartError, Failure};
use crate::notify::Notifier;
use crate::persistence::{CartPersistence, PersistenceError};

/// Cart state manager for one shopping session.
///
/// Generic over its three collaborators so front ends can wire the shipped
/// [`ApiClient`](crate::api::ApiClient) and
/// [`JsonFilePersistence`](crate::persistence::JsonFilePersistence) while
/// tests substitute fakes.
pub struct CartStore<C, S, P> {
    catalog: C,
    stock: S,
    persistence: P,
    notifier: Option<Arc<dyn Notifier>>,
    cart: Cart,
}

impl<C, S, P> CartStore<C, S, P>
where
    C: ProductCatalog,
    S: StockService,
    P: CartPersistence,
{
    /// Construct a store, loading the initial cart from persistence.
    ///
    /// An absent snapshot starts the session with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Load` if the stored snapshot cannot be read.
    pub async fn load(catalog: C, stock: S, persistence: P) -> Result<Self, CartError> {
        let cart = persistence.load().await?.unwrap_or_default();

        Ok(Self {
            catalog,
            stock,
            persistence,
            notifier: None,
            cart,
        })
    }

    /// Attach a notifier that receives the human-readable message of every
    /// failed mutation.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Ensure the cart contains `product_id` with one more unit than before,
    /// subject to stock.
    ///
    /// A product already in the cart is merged: its quantity is incremented
    /// by one instead of a duplicate entry being appended. The catalog is
    /// re-validated even on the merge path, so a product that has been
    /// dropped from the catalog can no longer be added; the existing item is
    /// left untouched and the add fails.
    ///
    /// # Errors
    ///
    /// - `CartError::AddFailed` - catalog or stock lookup failed, the
    ///   product does not exist, or the cart could not be persisted.
    /// - `CartError::OutOfStock` - no stock is available, or the merged
    ///   quantity would exceed available stock.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add(product_id).await;
        self.report(&result);
        result
    }

    /// Remove the item for `product_id` if present.
    ///
    /// Removing an absent product is a no-op, not an error, and produces no
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns `CartError::RemoveFailed` if the shrunk cart could not be
    /// persisted; the in-memory cart is left unchanged in that case.
    #[instrument(skip(self))]
    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove(product_id).await;
        self.report(&result);
        result
    }

    /// Set the exact quantity for an existing item, bounded by stock.
    ///
    /// Updating a product that is not in the cart is silently ignored:
    /// existence is checked, not asserted.
    ///
    /// # Errors
    ///
    /// - `CartError::UpdateFailed` - stock lookup or persistence failed.
    /// - `CartError::OutOfStock` - `amount` is below 1 or exceeds available
    ///   stock.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        let result = self.try_update(product_id, amount).await;
        self.report(&result);
        result
    }

    fn report(&self, result: &Result<(), CartError>) {
        if let (Some(notifier), Err(err)) = (&self.notifier, result) {
            notifier.error(&err.to_string());
        }
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let product = self
            .catalog
            .get(product_id)
            .await
            .map_err(|e| CartError::AddFailed(e.into()))?
            .ok_or_else(|| {
                CartError::AddFailed(Failure::Api(ApiError::NotFound(format!(
                    "product {product_id}"
                ))))
            })?;

        let stock = self
            .stock
            .get(product_id)
            .await
            .map_err(|e| CartError::AddFailed(e.into()))?;

        // Merge-on-add: delegate to the quantity update, which re-checks
        // stock against the incremented amount.
        if let Some(existing) = self.cart.get(product_id) {
            // Saturate so a corrupt snapshot at u32::MAX falls through to
            // the stock check instead of overflowing.
            let merged = existing.amount.saturating_add(1);
            return self.try_update(product_id, merged).await;
        }

        if stock.amount < 1 {
            return Err(CartError::OutOfStock {
                requested: 1,
                available: stock.amount,
            });
        }

        let next = self.cart.added(CartItem::new(product, 1));
        self.commit(next)
            .await
            .map_err(|e| CartError::AddFailed(e.into()))
    }

    async fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.cart.contains(product_id) {
            return Ok(());
        }

        let next = self.cart.without(product_id);
        self.commit(next)
            .await
            .map_err(|e| CartError::RemoveFailed(e.into()))
    }

    async fn try_update(&mut self, product_id: ProductId, amount: u32) -> Result<(), CartError> {
        if !self.cart.contains(product_id) {
            return Ok(());
        }

        let stock = self
            .stock
            .get(product_id)
            .await
            .map_err(|e| CartError::UpdateFailed(e.into()))?;

        if amount < 1 || amount > stock.amount {
            return Err(CartError::OutOfStock {
                requested: amount,
                available: stock.amount,
            });
        }

        let next = self.cart.with_amount(product_id, amount);
        self.commit(next)
            .await
            .map_err(|e| CartError::UpdateFailed(e.into()))
    }

    /// Persist `next` and make it the live cart.
    ///
    /// The live cart changes only when the write succeeds, so a failed
    /// mutation leaves both the in-memory cart and the stored snapshot at
    /// their previous values.
    async fn commit(&mut self, next: Cart) -> Result<(), PersistenceError> {
        self.persistence.save(&next).await?;
        self.cart = next;
        Ok(())
    }
}
