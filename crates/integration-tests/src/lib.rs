//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Store behavior across reloads of a file-backed slot
//! - `cart_http_catalog` - Store driven by the HTTP catalog against a mock API
//!
//! This crate also provides the shared fixtures used by those tests.

use rocketshoes_core::{CartItem, Product, ProductId};
use rust_decimal::Decimal;

/// Slot key used by the storefront.
pub const CART_KEY: &str = "@RocketShoes:cart";

/// A catalog product with a deterministic title, price and image.
#[must_use]
pub fn product(id: i32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Tênis RocketShoes {id}"),
        price: Decimal::new(13990 + i64::from(id) * 1000, 2),
        image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
        extra: serde_json::Map::new(),
    }
}

/// A cart line for [`product`].
#[must_use]
pub fn item(id: i32, amount: u32) -> CartItem {
    CartItem::from_product(product(id), amount)
}

/// JSON body the catalog API returns for [`product`].
#[must_use]
pub fn product_json(id: i32) -> String {
    serde_json::json!({
        "id": id,
        "title": format!("Tênis RocketShoes {id}"),
        "price": (13990.0 + f64::from(id) * 1000.0) / 100.0,
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
    })
    .to_string()
}

/// JSON body the catalog API returns for a stock level.
#[must_use]
pub fn stock_json(id: i32, amount: u32) -> String {
    serde_json::json!({ "id": id, "amount": amount }).to_string()
}
