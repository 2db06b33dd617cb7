//! Cart commands.
//!
//! Each invocation loads the cart from the configured slot, runs one
//! operation against the catalog API, and prints the resulting cart.
//! Notifications raised by the operation are printed to stderr and turn the
//! exit status into a failure.

use std::fmt::Write as _;

use rocketshoes_cart::{
    CartConfig, CartError, CartSlot, CartStore, CartSummary, Catalog, CatalogError, ConfigError,
    FileStorage, HttpCatalog, KeyValueStorage, Notifier, RecordingNotifier, SummaryError,
};
use rocketshoes_core::{CurrencyCode, ProductId};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog client could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed outside the notification path.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Cart totals could not be computed.
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Command-line argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation raised user-facing notifications.
    #[error("{}", .0.join("; "))]
    Notified(Vec<String>),
}

/// One cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Update(ProductId, i64),
    Clear,
}

/// Run `action` against the configured catalog and slot.
///
/// # Errors
///
/// Returns error if the catalog client cannot be built, the operation
/// raised notifications, or the cart totals overflow.
pub async fn run(config: &CartConfig, action: Action) -> Result<(), CliError> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    let slot = CartSlot::new(FileStorage::new(&config.storage.dir), &config.storage.key);
    let notifier = RecordingNotifier::new();
    let mut store = CartStore::new(catalog, slot, notifier.clone());

    let result = execute(&mut store, &notifier, action).await;
    let table = render_cart(&store, config.currency)?;

    #[allow(clippy::print_stdout)]
    {
        print!("{table}");
    }

    result
}

/// Render the current cart of `store` in `currency`.
///
/// # Errors
///
/// Returns `CliError::Summary` if the cart totals overflow.
pub fn render_cart<C, S, N>(
    store: &CartStore<C, S, N>,
    currency: CurrencyCode,
) -> Result<String, CliError>
where
    C: Catalog,
    S: KeyValueStorage,
    N: Notifier,
{
    Ok(render(&store.summary(currency)?))
}

/// Apply `action` to `store`, failing if `notifier` received anything.
///
/// # Errors
///
/// Returns `CliError::Notified` with the messages the operation raised, or
/// `CliError::Cart` if clearing the slot failed.
pub async fn execute<C, S>(
    store: &mut CartStore<C, S, RecordingNotifier>,
    notifier: &RecordingNotifier,
    action: Action,
) -> Result<(), CliError>
where
    C: Catalog,
    S: KeyValueStorage,
{
    tracing::debug!(?action, "Executing cart action");

    match action {
        Action::Show => {}
        Action::Add(id) => store.add_product(id).await,
        Action::Remove(id) => store.remove_product(id),
        Action::Update(id, amount) => store.update_product_amount(id, amount).await,
        Action::Clear => store.clear()?,
    }

    let notifications = notifier.notifications();
    if notifications.is_empty() {
        return Ok(());
    }

    #[allow(clippy::print_stderr)]
    for notification in &notifications {
        eprintln!("{}: {}", notification.severity, notification.message);
    }

    Err(CliError::Notified(
        notifications.into_iter().map(|n| n.message).collect(),
    ))
}

/// Plain-text table of the cart.
#[must_use]
pub fn render(summary: &CartSummary) -> String {
    if summary.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for line in &summary.lines {
        let _ = writeln!(
            out,
            "{:>4}  {:<40}  {:>3} x {:>10}  {:>11}",
            line.id.to_string(),
            line.title,
            line.amount,
            line.unit_price.display(),
            line.line_total.display(),
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), subtotal {}",
        summary.item_count,
        summary.subtotal.display()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rocketshoes_cart::{InMemoryCatalog, MemoryStorage};
    use rocketshoes_core::{CartItem, Product};
    use rust_decimal::Decimal;

    use super::*;

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::new().with_product(
            Product {
                id: ProductId::new(1),
                title: "Tênis de Caminhada".to_string(),
                price: Decimal::new(17990, 2),
                image: "walk.jpg".to_string(),
                extra: serde_json::Map::new(),
            },
            2,
        ))
    }

    fn store(
        notifier: &RecordingNotifier,
    ) -> CartStore<Arc<InMemoryCatalog>, MemoryStorage, RecordingNotifier> {
        CartStore::new(
            catalog(),
            CartSlot::new(MemoryStorage::new(), "cart"),
            notifier.clone(),
        )
    }

    #[tokio::test]
    async fn test_execute_success() {
        let notifier = RecordingNotifier::new();
        let mut store = store(&notifier);

        execute(&mut store, &notifier, Action::Add(ProductId::new(1)))
            .await
            .unwrap();
        execute(&mut store, &notifier, Action::Update(ProductId::new(1), 2))
            .await
            .unwrap();

        assert_eq!(store.cart()[0].amount, 2);
    }

    #[tokio::test]
    async fn test_execute_reports_notifications() {
        let notifier = RecordingNotifier::new();
        let mut store = store(&notifier);

        let result = execute(&mut store, &notifier, Action::Remove(ProductId::new(1))).await;

        assert!(
            matches!(result, Err(CliError::Notified(messages)) if messages == vec!["failed to remove product".to_string()])
        );
    }

    #[tokio::test]
    async fn test_execute_ignores_non_positive_update() {
        let notifier = RecordingNotifier::new();
        let mut store = store(&notifier);

        let result = execute(&mut store, &notifier, Action::Update(ProductId::new(1), -3)).await;

        assert!(result.is_ok());
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_execute_clear() {
        let notifier = RecordingNotifier::new();
        let mut store = store(&notifier);

        execute(&mut store, &notifier, Action::Add(ProductId::new(1)))
            .await
            .unwrap();
        execute(&mut store, &notifier, Action::Clear).await.unwrap();

        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_render_empty() {
        let summary = CartSummary::empty(CurrencyCode::BRL);
        assert_eq!(render(&summary), "Cart is empty\n");
    }

    #[tokio::test]
    async fn test_render_lines_and_total() {
        let notifier = RecordingNotifier::new();
        let mut store = store(&notifier);
        store.add_product(ProductId::new(1)).await;
        store.add_product(ProductId::new(1)).await;

        let output = render_cart(&store, CurrencyCode::BRL).unwrap();

        assert!(output.contains("Tênis de Caminhada"));
        assert!(output.contains("R$179.90"));
        assert!(output.contains("2 item(s), subtotal R$359.80"));
    }

    #[test]
    fn test_render_cart_reports_overflow_instead_of_panicking() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "cart",
                r#"[{"id": 1, "title": "Gold", "price": 5e28, "image": "gold.jpg", "amount": 2}]"#,
            )
            .unwrap();
        let store = CartStore::new(
            catalog(),
            CartSlot::new(storage, "cart"),
            RecordingNotifier::new(),
        );
        assert_eq!(store.cart().len(), 1);
        assert!(matches!(store.cart().first(), Some(CartItem { amount: 2, .. })));

        let result = render_cart(&store, CurrencyCode::BRL);

        assert!(matches!(result, Err(CliError::Summary(_))));
    }
}
