//! Voucher Applicability
//!
//! Decides whether a voucher is usable for a set of lines at all, and which lines it touches.
//! Gift lines and lines without units are left out of both decisions.

use crate::{
    discounts::decimal_to_minor,
    items::LineItem,
    vouchers::{ApplicabilityRule, Voucher, VoucherType},
};

/// Whether `item` is on the voucher's product list and may be priced by it.
pub fn is_eligible<'a, I: LineItem<'a>>(item: &I, voucher: &Voucher) -> bool {
    !item.is_gift() && voucher.lists(item.product())
}

/// Subtotal in minor units after promotions, ignoring any voucher.
///
/// Only counted, non-gift lines contribute.
pub fn subtotal_after_promotion<'a, I: LineItem<'a>>(items: &[I]) -> i64 {
    qualifying(items)
        .map(|item| {
            let unit = item
                .unit_price_minor()
                .saturating_sub(item.promotion_discount_minor());

            unit.saturating_mul(i64::from(item.quantity()))
        })
        .fold(0, i64::saturating_add)
}

/// Whether the voucher can be used for these lines at all.
///
/// - [`ApplicabilityRule::AllRequired`]: every line must be on the product list (vacuously true
///   for an unrestricted voucher).
/// - [`ApplicabilityRule::AtLeastOneRequired`]: at least one line must be on the list.
/// - Every type except [`VoucherType::SamePriceProduct`] also needs the subtotal after
///   promotion to reach the voucher's minimum order value.
///
/// Unrecognized types and rules are never applicable.
pub fn is_applicable<'a, I: LineItem<'a>>(items: &[I], voucher: &Voucher) -> bool {
    let applicable = check(items, voucher);

    tracing::debug!(
        voucher = voucher.code(),
        kind = %voucher.kind(),
        rule = %voucher.rule(),
        applicable,
        "evaluated voucher applicability"
    );

    applicable
}

fn check<'a, I: LineItem<'a>>(items: &[I], voucher: &Voucher) -> bool {
    let Some(first) = qualifying(items).next() else {
        return false;
    };

    let rule_satisfied = match voucher.rule() {
        ApplicabilityRule::AllRequired => {
            voucher.products().is_empty()
                || qualifying(items).all(|item| voucher.lists(item.product()))
        }
        ApplicabilityRule::AtLeastOneRequired => {
            qualifying(items).any(|item| voucher.lists(item.product()))
        }
        ApplicabilityRule::Unrecognized(rule) => {
            tracing::warn!(voucher = voucher.code(), %rule, "unrecognized applicability rule");

            return false;
        }
    };

    if !rule_satisfied {
        return false;
    }

    match voucher.kind() {
        VoucherType::SamePriceProduct => true,
        VoucherType::PercentOrder | VoucherType::FixedValue => {
            let currency = first.original_price().currency();

            let Some(min_order) = decimal_to_minor(voucher.min_order_value(), currency) else {
                tracing::warn!(
                    voucher = voucher.code(),
                    min_order_value = %voucher.min_order_value(),
                    "minimum order value not representable"
                );

                return false;
            };

            subtotal_after_promotion(items) >= min_order
        }
        VoucherType::Unrecognized(kind) => {
            tracing::warn!(voucher = voucher.code(), %kind, "unrecognized voucher type");

            false
        }
    }
}

fn qualifying<'a, 'i, I: LineItem<'a>>(items: &'i [I]) -> impl Iterator<Item = &'i I> {
    items.iter().filter(|item| item.counts() && !item.is_gift())
}
