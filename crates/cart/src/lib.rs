//! RocketShoes Cart - stock-checked shopping cart store.
//!
//! The [`CartStore`] holds the ordered cart lines in memory, validates every
//! quantity change against a [`Catalog`] stock read, and mirrors the result to
//! a key-value persistence slot after each successful mutation. Failures and
//! rejections are reported through a [`Notifier`] instead of being returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{CartConfig, CartSlot, CartStore, FileStorage, HttpCatalog, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let slot = CartSlot::new(FileStorage::new(&config.storage.dir), &config.storage.key);
//! let mut store = CartStore::new(catalog, slot, TracingNotifier);
//!
//! store.add_product(ProductId::new(1)).await;
//! store.update_product_amount(ProductId::new(1), 3).await;
//! store.remove_product(ProductId::new(1));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;
pub mod summary;

pub use catalog::{Catalog, CatalogError, HttpCatalog, InMemoryCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError, StorageConfig};
pub use error::{CartError, Operation};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use storage::{CartSlot, FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
pub use summary::{CartLineSummary, CartSummary, SummaryError};
