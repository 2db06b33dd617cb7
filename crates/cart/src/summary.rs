//! Cart totals for display.

use rocketshoes_core::{CartItem, CurrencyCode, Price, ProductId};
use thiserror::Error;

/// Errors that can occur while totalling a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// A line total did not fit in a decimal.
    #[error("Line total for product {0} is out of range")]
    LineOverflow(ProductId),

    /// The subtotal did not fit in a decimal.
    #[error("Cart subtotal is out of range")]
    SubtotalOverflow,
}

/// One cart line with its prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineSummary {
    pub id: ProductId,
    pub title: String,
    pub amount: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Cart lines plus aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartLineSummary>,
    /// Sum of all line amounts.
    pub item_count: u64,
    pub subtotal: Price,
}

impl CartSummary {
    /// Summarize `items` in `currency`.
    ///
    /// # Errors
    ///
    /// Returns error if a line total or the subtotal overflows.
    pub fn new(items: &[CartItem], currency: CurrencyCode) -> Result<Self, SummaryError> {
        let lines = items
            .iter()
            .map(|item| {
                let unit_price = Price::new(item.price, currency);
                let line_total = unit_price
                    .times(item.amount)
                    .ok_or(SummaryError::LineOverflow(item.id))?;

                Ok(CartLineSummary {
                    id: item.id,
                    title: item.title.clone(),
                    amount: item.amount,
                    unit_price,
                    line_total,
                })
            })
            .collect::<Result<Vec<_>, SummaryError>>()?;

        let subtotal = lines
            .iter()
            .try_fold(Price::zero(currency), |acc, line| {
                acc.checked_add(&line.line_total)
            })
            .ok_or(SummaryError::SubtotalOverflow)?;

        Ok(Self {
            item_count: items.iter().map(|item| u64::from(item.amount)).sum(),
            lines,
            subtotal,
        })
    }

    /// An empty cart.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            subtotal: Price::zero(currency),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::Map;

    use super::*;

    fn item(id: i32, cents: i64, amount: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            price: Decimal::new(cents, 2),
            image: format!("shoe-{id}.jpg"),
            amount,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_empty() {
        let summary = CartSummary::empty(CurrencyCode::BRL);
        assert!(summary.is_empty());
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.subtotal.display(), "R$0.00");
    }

    #[test]
    fn test_totals() {
        let items = [item(1, 17990, 2), item(2, 13990, 1)];
        let summary = CartSummary::new(&items, CurrencyCode::BRL).unwrap();

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].line_total.display(), "R$359.80");
        assert_eq!(summary.lines[1].unit_price.display(), "R$139.90");
        assert_eq!(summary.subtotal.display(), "R$499.70");
    }

    #[test]
    fn test_preserves_line_order() {
        let items = [item(3, 100, 1), item(1, 100, 1), item(2, 100, 1)];
        let summary = CartSummary::new(&items, CurrencyCode::USD).unwrap();

        let ids: Vec<i32> = summary.lines.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_huge_stored_price_is_an_error() {
        let item: CartItem = serde_json::from_str(
            r#"{"id": 1, "title": "Gold", "price": 5e28, "image": "gold.jpg", "amount": 2}"#,
        )
        .unwrap();

        let result = CartSummary::new(&[item], CurrencyCode::BRL);

        assert_eq!(result, Err(SummaryError::LineOverflow(ProductId::new(1))));
    }

    #[test]
    fn test_subtotal_overflow_is_an_error() {
        let mut big = item(1, 0, 1);
        big.price = Decimal::MAX;
        let mut other = item(2, 0, 1);
        other.price = Decimal::MAX;

        let result = CartSummary::new(&[big, other], CurrencyCode::BRL);

        assert_eq!(result, Err(SummaryError::SubtotalOverflow));
    }
}
