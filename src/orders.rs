//! Placed orders

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{cart::ensure_currency, items::OrderItem};

/// Errors related to order construction.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An item's currency differs from the order currency (index, item currency, order currency).
    #[error("Order item {0} has currency {1}, but order has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// An order that has already been placed.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    reference: String,
    items: Vec<OrderItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Order<'a> {
    /// Create an order from its placed lines.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` if a line is priced in another currency.
    pub fn with_items(
        reference: impl Into<String>,
        items: impl Into<Vec<OrderItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, OrderError> {
        let items = items.into();

        ensure_currency(&items, currency).map_err(|(i, item_currency)| {
            OrderError::CurrencyMismatch(i, item_currency, currency.iso_alpha_code)
        })?;

        Ok(Self {
            reference: reference.into(),
            items,
            currency,
        })
    }

    /// Order reference shown to the customer.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Order lines
    pub fn items(&self) -> &[OrderItem<'a>] {
        &self.items
    }

    /// Get the currency of the order.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
