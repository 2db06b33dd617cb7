//! Catalog service clients.
//!
//! # Architecture
//!
//! - [`Catalog`] is the read-only seam the cart store depends on
//! - [`HttpCatalog`] talks to the catalog REST API with `reqwest`
//! - [`InMemoryCatalog`] serves fixed data for tests and offline sessions
//!
//! # Endpoints
//!
//! - `GET /stock/{id}` → `{ "id": 1, "amount": 3 }`
//! - `GET /products/{id}` → `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
//!
//! Stock reads are never cached; every stock check hits the API.

mod cache;
mod http;
mod memory;

use std::future::Future;
use std::sync::Arc;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;

/// Errors that can occur when reading from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configured API token cannot be sent as a header.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    /// Catalog is unreachable or refused to answer.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only product and stock lookups.
pub trait Catalog {
    /// Current stock level for a product.
    fn fetch_stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send;

    /// Product details.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

impl<C: Catalog + Send + Sync> Catalog for Arc<C> {
    fn fetch_stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).fetch_stock(id)
    }

    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        (**self).fetch_product(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("products/7".to_string());
        assert_eq!(err.to_string(), "Not found: products/7");

        let err = CatalogError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }
}
