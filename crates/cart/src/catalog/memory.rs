//! In-memory catalog.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use rocketshoes_core::{Product, ProductId, Stock};

use super::{Catalog, CatalogError};

/// Catalog backed by in-process maps.
///
/// Stock levels can be changed after construction and individual products can
/// be marked unavailable to simulate catalog outages.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, u32>>,
    unavailable: RwLock<HashSet<ProductId>>,
    stock_requests: AtomicUsize,
    product_requests: AtomicUsize,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its stock level.
    #[must_use]
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.insert_product(product, stock);
        self
    }

    /// Register or replace a product with its stock level.
    pub fn insert_product(&self, product: Product, stock: u32) {
        self.set_stock(product.id, stock);
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, product);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, amount);
    }

    /// Make every lookup for `id` fail until [`Self::set_available`] is called.
    pub fn set_unavailable(&self, id: ProductId) {
        self.unavailable
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
    }

    /// Undo [`Self::set_unavailable`].
    pub fn set_available(&self, id: ProductId) {
        self.unavailable
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    /// Number of stock lookups served so far.
    #[must_use]
    pub fn stock_requests(&self) -> usize {
        self.stock_requests.load(Ordering::Relaxed)
    }

    /// Number of product lookups served so far.
    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.product_requests.load(Ordering::Relaxed)
    }

    fn check_available(&self, id: ProductId) -> Result<(), CatalogError> {
        if self
            .unavailable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
        {
            return Err(CatalogError::Unavailable(format!("product {id}")));
        }
        Ok(())
    }
}

impl Catalog for InMemoryCatalog {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_requests.fetch_add(1, Ordering::Relaxed);
        self.check_available(id)?;

        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or_else(|| CatalogError::NotFound(format!("stock/{id}")))
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.product_requests.fetch_add(1, Ordering::Relaxed);
        self.check_available(id)?;

        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("products/{id}")))
    }
}
