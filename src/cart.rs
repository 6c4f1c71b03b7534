//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::{CartItem, LineItem};

/// Errors related to cart construction.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// In-progress cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if an item is priced in another currency.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        ensure_currency(&items, currency).map_err(|(i, item_currency)| {
            CartError::CurrencyMismatch(i, item_currency, currency.iso_alpha_code)
        })?;

        Ok(Cart { items, currency })
    }

    /// Subtotal of all counted lines before any discount.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .items
            .iter()
            .filter(|item| item.counts())
            .map(|item| item.unit_price_minor().saturating_mul(i64::from(item.quantity())))
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor, self.currency)
    }

    /// Cart lines
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// Iterate over the cart lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Find the first line priced in a currency other than `currency`.
pub(crate) fn ensure_currency<'a, I: LineItem<'a>>(
    items: &[I],
    currency: &Currency,
) -> Result<(), (usize, &'static str)> {
    items.iter().enumerate().try_for_each(|(i, item)| {
        let item_currency = item.original_price().currency();

        if item_currency == currency {
            Ok(())
        } else {
            Err((i, item_currency.iso_alpha_code))
        }
    })
}
