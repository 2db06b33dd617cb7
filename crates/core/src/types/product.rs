//! Catalog records and cart lines.
//!
//! The JSON shapes match the catalog API (`/products/{id}`, `/stock/{id}`)
//! and the persisted cart blob, so these types are used on both wires.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// A product as returned by the catalog.
///
/// Fields the catalog sends beyond the ones the cart reads are kept in
/// `extra` and carried into the cart line unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stock level for a product at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    /// Maximum purchasable quantity.
    pub amount: u32,
}

/// A product line held in the cart.
///
/// `amount` is the quantity in the cart and is the only field that changes
/// after the line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Create a cart line from a catalog product.
    #[must_use]
    pub fn from_product(product: Product, amount: u32) -> Self {
        let Product {
            id,
            title,
            price,
            image,
            extra,
        } = product;

        Self {
            id,
            title,
            price,
            image,
            amount,
            extra,
        }
    }

    /// Price of the whole line (`price * amount`), or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.amount))
    }
}
