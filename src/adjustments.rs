//! Adjustments
//!
//! Caller-side amounts layered on top of [`Totals`] after aggregation: delivery fee, loyalty
//! point redemption and the automatic discount granted under a threshold. They are added to
//! or taken from `final_total`, never folded into it.

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::totals::Totals;

/// Amounts applied after the engine has totalled an order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjustments<'a> {
    /// Delivery fee added to the total.
    pub delivery_fee: Option<Money<'a, Currency>>,

    /// Value of loyalty points redeemed against the total.
    pub loyalty_redemption: Option<Money<'a, Currency>>,

    /// Automatic discount granted when an order falls under a threshold.
    pub under_threshold_discount: Option<Money<'a, Currency>>,
}

/// What the customer finally pays, with every layer kept visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payable<'a> {
    /// Engine totals the adjustments were applied to.
    pub totals: Totals<'a>,

    /// Delivery fee added.
    pub delivery_fee: Money<'a, Currency>,

    /// Loyalty redemption subtracted.
    pub loyalty_redemption: Money<'a, Currency>,

    /// Under-threshold discount subtracted.
    pub under_threshold_discount: Money<'a, Currency>,

    /// `final_total + delivery_fee - loyalty_redemption - under_threshold_discount`, never
    /// below zero.
    pub amount_due: Money<'a, Currency>,
}

impl<'a> Adjustments<'a> {
    /// No adjustments.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the delivery fee.
    #[must_use]
    pub fn with_delivery_fee(mut self, fee: Money<'a, Currency>) -> Self {
        self.delivery_fee = Some(fee);
        self
    }

    /// Set the loyalty redemption.
    #[must_use]
    pub fn with_loyalty_redemption(mut self, amount: Money<'a, Currency>) -> Self {
        self.loyalty_redemption = Some(amount);
        self
    }

    /// Set the under-threshold discount.
    #[must_use]
    pub fn with_under_threshold_discount(mut self, amount: Money<'a, Currency>) -> Self {
        self.under_threshold_discount = Some(amount);
        self
    }

    /// Apply the adjustments on top of `totals`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if an adjustment is in a different currency from the totals.
    pub fn apply(&self, totals: Totals<'a>) -> Result<Payable<'a>, MoneyError> {
        let currency = totals.currency();
        let zero = Money::from_minor(0, currency);

        let delivery_fee = self.delivery_fee.unwrap_or(zero);
        let loyalty_redemption = self.loyalty_redemption.unwrap_or(zero);
        let under_threshold_discount = self.under_threshold_discount.unwrap_or(zero);

        let due = totals
            .final_total
            .add(delivery_fee)?
            .sub(loyalty_redemption)?
            .sub(under_threshold_discount)?;

        let amount_due = if due.to_minor_units() < 0 { zero } else { due };

        Ok(Payable {
            totals,
            delivery_fee,
            loyalty_redemption,
            under_threshold_discount,
            amount_due,
        })
    }
}
