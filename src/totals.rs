//! Totals
//!
//! Sums resolved lines into order-level figures. Percentage and fixed `ALL_REQUIRED` vouchers
//! are computed here, once, on the post-promotion subtotal; every other voucher is the sum of
//! what the lines already report.
//!
//! `final_total` always equals `subtotal_before_discount - promotion_discount -
//! voucher_discount`: the voucher discount is capped so that the total cannot go negative.
//! Delivery fees and other caller-side adjustments are layered on afterwards by
//! [`crate::adjustments`].

use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{decimal_to_minor, points_of_minor},
    display::{DisplayItem, is_order_level},
    items::LineItem,
    vouchers::{Voucher, VoucherType, applicability::is_applicable},
};

/// Order-level price breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals<'a> {
    /// Sum of original prices.
    pub subtotal_before_discount: Money<'a, Currency>,

    /// Sum of promotion discounts actually used.
    pub promotion_discount: Money<'a, Currency>,

    /// Voucher discount for the whole order.
    pub voucher_discount: Money<'a, Currency>,

    /// Amount payable before caller-side adjustments.
    pub final_total: Money<'a, Currency>,
}

impl<'a> Totals<'a> {
    /// All-zero totals in `currency`.
    pub fn zero(currency: &'a Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal_before_discount: zero,
            promotion_discount: zero,
            voucher_discount: zero,
            final_total: zero,
        }
    }

    /// Promotion plus voucher discount.
    pub fn savings(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.promotion_discount
                .to_minor_units()
                .saturating_add(self.voucher_discount.to_minor_units()),
            self.final_total.currency(),
        )
    }

    /// Currency of every figure.
    pub fn currency(&self) -> &'a Currency {
        self.final_total.currency()
    }
}

/// Totals for a cart. An empty cart totals to zero.
pub fn aggregate_cart_totals<'a>(
    display_items: &[DisplayItem<'a>],
    voucher: Option<&Voucher>,
    currency: &'a Currency,
) -> Totals<'a> {
    aggregate(display_items, voucher, currency)
}

/// Totals for a placed order, or `None` when there are no lines to total.
pub fn aggregate_order_totals<'a>(
    display_items: &[DisplayItem<'a>],
    voucher: Option<&Voucher>,
) -> Option<Totals<'a>> {
    let currency = display_items.first()?.original_price.currency();

    Some(aggregate(display_items, voucher, currency))
}

fn aggregate<'a>(
    items: &[DisplayItem<'a>],
    voucher: Option<&Voucher>,
    currency: &'a Currency,
) -> Totals<'a> {
    let subtotal = sum_lines(items, |item| item.original_price);
    let promotion = sum_lines(items, |item| item.promotion_discount);
    let after_promotion = subtotal.saturating_sub(promotion).max(0);

    let voucher_discount = voucher
        .filter(|voucher| is_applicable(items, voucher))
        .map_or(0, |voucher| voucher_discount(items, voucher, currency))
        .clamp(0, after_promotion);

    let final_total = after_promotion.saturating_sub(voucher_discount);

    tracing::debug!(
        voucher = voucher.map(Voucher::code),
        subtotal,
        promotion,
        voucher_discount,
        final_total,
        "aggregated totals"
    );

    Totals {
        subtotal_before_discount: Money::from_minor(subtotal, currency),
        promotion_discount: Money::from_minor(promotion, currency),
        voucher_discount: Money::from_minor(voucher_discount, currency),
        final_total: Money::from_minor(final_total, currency),
    }
}

fn voucher_discount(items: &[DisplayItem<'_>], voucher: &Voucher, currency: &Currency) -> i64 {
    if !is_order_level(voucher) {
        return sum_lines(items, |item| item.voucher_discount);
    }

    // gift lines are outside the voucher's reach
    let base = items
        .iter()
        .filter(|item| item.counts() && !item.is_gift())
        .map(|item| line_minor(item, item.price_after_promotion))
        .fold(0, i64::saturating_add);

    let discount = match voucher.kind() {
        VoucherType::PercentOrder => points_of_minor(voucher.value(), base),
        VoucherType::FixedValue => decimal_to_minor(voucher.value(), currency),
        VoucherType::SamePriceProduct | VoucherType::Unrecognized(_) => Some(0),
    };

    discount.map_or_else(
        || {
            tracing::warn!(
                voucher = voucher.code(),
                value = %voucher.value(),
                "voucher value not representable for order, totalling without voucher"
            );

            0
        },
        |discount| discount.clamp(0, base.max(0)),
    )
}

fn sum_lines<'a>(
    items: &[DisplayItem<'a>],
    field: impl Fn(&DisplayItem<'a>) -> Money<'a, Currency>,
) -> i64 {
    items
        .iter()
        .filter(|item| item.counts())
        .map(|item| line_minor(item, field(item)))
        .fold(0, i64::saturating_add)
}

fn line_minor(item: &DisplayItem<'_>, unit: Money<'_, Currency>) -> i64 {
    unit.to_minor_units().saturating_mul(i64::from(item.quantity))
}
