//! Key-value persistence slots.
//!
//! A [`KeyValueStorage`] is a synchronous string store in the spirit of
//! browser `localStorage`. The cart lives in a single key as a JSON array of
//! [`CartItem`] and is always written whole.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, for tests and ephemeral sessions
//! - [`FileStorage`] - one file per key under a directory

mod file;
mod memory;

use std::sync::Arc;

use rocketshoes_core::CartItem;
use thiserror::Error;
use tracing::{debug, warn};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cart could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Synchronous string key-value store.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// CartSlot
// =============================================================================

/// The single storage key holding the serialized cart.
#[derive(Debug, Clone)]
pub struct CartSlot<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartSlot<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored cart.
    ///
    /// A missing, unreadable or unparsable slot yields an empty cart. The slot
    /// itself is left untouched so the bad value is only replaced by the next
    /// successful save.
    pub fn load(&self) -> Vec<CartItem> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                debug!(key = %self.key, lines = items.len(), "Loaded stored cart");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `items`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the storage write fails; the slot is
    /// unchanged in that case.
    pub fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.storage.set_item(&self.key, &raw)
    }

    /// Delete the slot.
    ///
    /// # Errors
    ///
    /// Returns error if the storage write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}
