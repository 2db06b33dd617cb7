//! Cart operation errors.
//!
//! Every failure inside a cart operation is a [`CartError`]. The store never
//! returns these to callers of the public operations; instead each error is
//! mapped to a user-facing message through the [`Operation`] that raised it.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notify::messages;
use crate::storage::StorageError;

/// Errors raised while computing or committing a cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persistence slot read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Requested quantity exceeds the stock known to the catalog.
    #[error("Product {id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),
}

impl CartError {
    /// Whether this is a business-rule rejection rather than a fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::OutOfStock { .. })
    }
}

/// The cart operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Message shown when this operation fails for any reason other than stock.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => messages::ADD_FAILED,
            Self::Remove => messages::REMOVE_FAILED,
            Self::UpdateAmount => messages::UPDATE_FAILED,
        }
    }

    /// Message shown for `error` raised by this operation.
    #[must_use]
    pub const fn message_for(self, error: &CartError) -> &'static str {
        if error.is_rejection() {
            messages::STOCK_UNAVAILABLE
        } else {
            self.failure_message()
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add_product"),
            Self::Remove => write!(f, "remove_product"),
            Self::UpdateAmount => write!(f, "update_product_amount"),
        }
    }
}
