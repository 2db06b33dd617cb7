//! Integration tests for cart persistence.
//!
//! These tests drive the cart store against a file-backed slot and verify
//! that reloading the slot reproduces exactly the cart that was published.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rocketshoes_cart::notify::messages;
use rocketshoes_cart::{
    CartSlot, CartStore, FileStorage, InMemoryCatalog, KeyValueStorage, RecordingNotifier,
};
use rocketshoes_core::{CartItem, ProductId};
use rocketshoes_integration_tests::{CART_KEY, item, product};

type Store = CartStore<Arc<InMemoryCatalog>, FileStorage, RecordingNotifier>;

fn open(dir: &std::path::Path, catalog: &Arc<InMemoryCatalog>, notifier: &RecordingNotifier) -> Store {
    CartStore::new(
        Arc::clone(catalog),
        CartSlot::new(FileStorage::new(dir), CART_KEY),
        notifier.clone(),
    )
}

fn catalog() -> Arc<InMemoryCatalog> {
    Arc::new(
        InMemoryCatalog::new()
            .with_product(product(1), 5)
            .with_product(product(2), 0)
            .with_product(product(3), 2)
            .with_product(product(4), 10),
    )
}

// =============================================================================
// Round Trip
// =============================================================================

#[tokio::test]
async fn test_reload_reproduces_cart_after_each_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);

    store.add_product(ProductId::new(4)).await;
    assert_eq!(open(dir.path(), &catalog, &notifier).cart(), store.cart());

    store.add_product(ProductId::new(1)).await;
    assert_eq!(open(dir.path(), &catalog, &notifier).cart(), store.cart());

    store.add_product(ProductId::new(3)).await;
    store.update_product_amount(ProductId::new(1), 4).await;
    assert_eq!(open(dir.path(), &catalog, &notifier).cart(), store.cart());

    store.remove_product(ProductId::new(4));
    let reloaded = open(dir.path(), &catalog, &notifier);
    assert_eq!(reloaded.cart(), store.cart());
    assert_eq!(reloaded.cart(), &[item(1, 4), item(3, 1)]);

    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_rejected_mutation_does_not_touch_slot() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);

    store.add_product(ProductId::new(3)).await;
    store.add_product(ProductId::new(3)).await;
    let storage = FileStorage::new(dir.path());
    let before = storage.get_item(CART_KEY).unwrap();

    store.add_product(ProductId::new(3)).await;
    store.update_product_amount(ProductId::new(3), 3).await;
    store.add_product(ProductId::new(2)).await;
    store.remove_product(ProductId::new(9));

    assert_eq!(storage.get_item(CART_KEY).unwrap(), before);
    assert_eq!(
        notifier.messages(),
        vec![
            messages::STOCK_UNAVAILABLE.to_string(),
            messages::STOCK_UNAVAILABLE.to_string(),
            messages::STOCK_UNAVAILABLE.to_string(),
            messages::REMOVE_FAILED.to_string(),
        ]
    );
}

// =============================================================================
// Malformed Slot
// =============================================================================

#[tokio::test]
async fn test_malformed_slot_starts_empty_and_is_replaced_on_next_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.set_item(CART_KEY, "[{\"id\": 1, \"amount\":").unwrap();

    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);
    assert!(store.cart().is_empty());

    store.add_product(ProductId::new(1)).await;

    let raw = storage.get_item(CART_KEY).unwrap().unwrap();
    let persisted: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, vec![item(1, 1)]);
}

// =============================================================================
// Reference Examples
// =============================================================================

#[tokio::test]
async fn test_existing_line_is_incremented() {
    let dir = tempfile::tempdir().unwrap();
    CartSlot::new(FileStorage::new(dir.path()), CART_KEY)
        .save(&[item(1, 1)])
        .unwrap();

    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);

    store.add_product(ProductId::new(1)).await;

    assert_eq!(store.cart(), &[item(1, 2)]);
}

#[tokio::test]
async fn test_out_of_stock_product_is_not_added() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);

    store.add_product(ProductId::new(2)).await;

    assert!(store.cart().is_empty());
    assert_eq!(
        notifier.messages(),
        vec![messages::STOCK_UNAVAILABLE.to_string()]
    );
    assert_eq!(FileStorage::new(dir.path()).get_item(CART_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_stock_is_checked_at_mutation_time_only() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let notifier = RecordingNotifier::new();
    let mut store = open(dir.path(), &catalog, &notifier);

    store.update_product_amount(ProductId::new(1), 1).await;
    store.add_product(ProductId::new(1)).await;
    store.update_product_amount(ProductId::new(1), 5).await;

    // Stock shrinks behind the cart's back; the stored amount goes stale.
    catalog.set_stock(ProductId::new(1), 2);
    let reloaded = open(dir.path(), &catalog, &notifier);
    assert_eq!(reloaded.cart(), &[item(1, 5)]);

    // The next mutation sees the new level.
    store.update_product_amount(ProductId::new(1), 3).await;
    store.update_product_amount(ProductId::new(1), 2).await;

    assert_eq!(store.cart(), &[item(1, 2)]);
    assert_eq!(
        notifier.messages(),
        vec![messages::STOCK_UNAVAILABLE.to_string()]
    );
}
