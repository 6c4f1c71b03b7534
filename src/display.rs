//! Display Items
//!
//! Resolves each cart or order line into its UI-ready price breakdown. Cart and order lines
//! go through the same resolver via [`LineItem`].
//!
//! Per-line rules, once the voucher is applicable:
//!
//! | rule                    | type                          | eligible | line pricing                  |
//! |-------------------------|-------------------------------|----------|-------------------------------|
//! | `ALL_REQUIRED`          | `PERCENT_ORDER`/`FIXED_VALUE` | yes      | promotion only, voucher later |
//! | any                     | `SAME_PRICE_PRODUCT`          | yes      | pinned to target price        |
//! | `AT_LEAST_ONE_REQUIRED` | `PERCENT_ORDER`               | yes      | percent off original price    |
//! | `AT_LEAST_ONE_REQUIRED` | `FIXED_VALUE`                 | yes      | amount off original price     |
//! | any                     | any                           | no       | promotion only                |
//!
//! Wherever the voucher prices a line itself, the line's promotion is dropped. `ALL_REQUIRED`
//! percentage and fixed vouchers are discounted once on the order subtotal by
//! [`crate::totals`].
//!
//! Lines are always recomputed from their inputs; nothing here is cached.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    discounts::{decimal_to_minor, fixed_discount, percent_discount, same_price_target},
    items::{LineItem, Promotion},
    orders::Order,
    products::ProductSlug,
    vouchers::{
        ApplicabilityRule, Voucher, VoucherType,
        applicability::{is_applicable, is_eligible},
    },
};

/// How the attached voucher affected a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePricing {
    /// No voucher effect; the line carries its promotion.
    Regular,

    /// Covered by a voucher discounted once on the order subtotal. The line itself still
    /// reports promotion-only pricing.
    OrderLevelVoucher,

    /// The voucher replaced the promotion on this line.
    LineVoucher,
}

/// Resolved, UI-ready representation of a line.
///
/// All amounts are per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem<'a> {
    /// Product of the line.
    pub product: ProductSlug,

    /// Units on the line.
    pub quantity: u32,

    /// Whether the line is a reward gift.
    pub gift: bool,

    /// Promotion carried by the source line, whether or not it was used.
    pub promotion: Option<Promotion>,

    /// Unit price before any discount.
    pub original_price: Money<'a, Currency>,

    /// Promotion discount actually used on the line.
    pub promotion_discount: Money<'a, Currency>,

    /// `original_price - promotion_discount`.
    pub price_after_promotion: Money<'a, Currency>,

    /// Voucher discount assigned to the line.
    pub voucher_discount: Money<'a, Currency>,

    /// Unit price the customer pays for this line.
    pub final_price: Money<'a, Currency>,

    /// How the voucher affected the line.
    pub pricing: LinePricing,
}

impl<'a> DisplayItem<'a> {
    /// `final_price * quantity`.
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.final_price
                .to_minor_units()
                .saturating_mul(i64::from(self.quantity)),
            self.final_price.currency(),
        )
    }

    fn promotion_priced<I: LineItem<'a>>(item: &I, pricing: LinePricing) -> Self {
        let promotion_discount = item.promotion_discount_minor();

        Self::build(item, promotion_discount, 0, pricing)
    }

    fn voucher_priced<I: LineItem<'a>>(item: &I, voucher_discount: i64) -> Self {
        Self::build(item, 0, voucher_discount, LinePricing::LineVoucher)
    }

    fn build<I: LineItem<'a>>(
        item: &I,
        promotion_discount: i64,
        voucher_discount: i64,
        pricing: LinePricing,
    ) -> Self {
        let currency = item.original_price().currency();
        let original = item.unit_price_minor();
        let price_after_promotion = original.saturating_sub(promotion_discount);
        let final_price = price_after_promotion.saturating_sub(voucher_discount).max(0);

        Self {
            product: item.product().clone(),
            quantity: item.quantity(),
            gift: item.is_gift(),
            promotion: item.promotion().copied(),
            original_price: Money::from_minor(original, currency),
            promotion_discount: Money::from_minor(promotion_discount, currency),
            price_after_promotion: Money::from_minor(price_after_promotion, currency),
            voucher_discount: Money::from_minor(voucher_discount, currency),
            final_price: Money::from_minor(final_price, currency),
            pricing,
        }
    }
}

impl<'a> LineItem<'a> for DisplayItem<'a> {
    fn product(&self) -> &ProductSlug {
        &self.product
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn original_price(&self) -> Money<'a, Currency> {
        self.original_price
    }

    fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    fn is_gift(&self) -> bool {
        self.gift
    }
}

/// Resolve the lines of an in-progress cart.
pub fn resolve_cart_item_display<'a>(
    cart: &Cart<'a>,
    voucher: Option<&Voucher>,
) -> Vec<DisplayItem<'a>> {
    resolve_items(cart.items(), voucher)
}

/// Resolve the lines of an already-placed order.
pub fn resolve_order_item_display<'a>(
    order: &Order<'a>,
    voucher: Option<&Voucher>,
) -> Vec<DisplayItem<'a>> {
    resolve_items(order.items(), voucher)
}

/// Resolve any set of lines against an optional voucher.
///
/// A voucher that is not applicable to `items` as a whole is treated as absent.
pub fn resolve_items<'a, I: LineItem<'a>>(
    items: &[I],
    voucher: Option<&Voucher>,
) -> Vec<DisplayItem<'a>> {
    let voucher = voucher.filter(|voucher| is_applicable(items, voucher));

    items
        .iter()
        .map(|item| {
            let line = resolve_item(item, voucher);

            tracing::trace!(
                product = %line.product,
                quantity = line.quantity,
                final_price = line.final_price.to_minor_units(),
                pricing = ?line.pricing,
                "resolved line"
            );

            line
        })
        .collect()
}

/// Resolve one line against a voucher already known to be applicable to its cart or order.
pub fn resolve_item<'a, I: LineItem<'a>>(item: &I, voucher: Option<&Voucher>) -> DisplayItem<'a> {
    let touched = voucher.filter(|voucher| is_eligible(item, voucher) || covers(item, voucher));

    let Some(voucher) = touched else {
        return DisplayItem::promotion_priced(item, LinePricing::Regular);
    };

    let unit_price = item.unit_price_minor();
    let currency = item.original_price().currency();

    match line_voucher_discount(voucher, unit_price, currency) {
        LineDiscount::Deferred => {
            DisplayItem::promotion_priced(item, LinePricing::OrderLevelVoucher)
        }
        LineDiscount::Unit(discount) => DisplayItem::voucher_priced(item, discount),
        LineDiscount::None => DisplayItem::promotion_priced(item, LinePricing::Regular),
    }
}

/// An applicable `ALL_REQUIRED` order-level voucher covers every non-gift line, listed or not
/// (an unrestricted voucher lists nothing).
fn covers<'a, I: LineItem<'a>>(item: &I, voucher: &Voucher) -> bool {
    !item.is_gift() && is_order_level(voucher)
}

/// Whether the voucher is discounted once on the order subtotal rather than per line.
pub(crate) fn is_order_level(voucher: &Voucher) -> bool {
    *voucher.rule() == ApplicabilityRule::AllRequired
        && matches!(voucher.kind(), VoucherType::PercentOrder | VoucherType::FixedValue)
}

enum LineDiscount {
    /// Resolved at order level; the line keeps its promotion.
    Deferred,

    /// Per-unit voucher discount that replaces the promotion.
    Unit(i64),

    /// The voucher has no effect on the line.
    None,
}

fn line_voucher_discount(voucher: &Voucher, unit_price: i64, currency: &Currency) -> LineDiscount {
    if is_order_level(voucher) {
        return LineDiscount::Deferred;
    }

    let discount = match (voucher.rule(), voucher.kind()) {
        (_, VoucherType::SamePriceProduct) => {
            same_price_target(voucher.value(), unit_price, currency)
                .map(|target| unit_price.saturating_sub(target))
        }
        (ApplicabilityRule::AtLeastOneRequired, VoucherType::PercentOrder) => {
            percent_discount(voucher.value(), unit_price)
        }
        (ApplicabilityRule::AtLeastOneRequired, VoucherType::FixedValue) => {
            decimal_to_minor(voucher.value(), currency)
                .map(|amount| fixed_discount(amount, unit_price))
        }
        _ => return LineDiscount::None,
    };

    if let Some(discount) = discount {
        LineDiscount::Unit(discount)
    } else {
        tracing::warn!(
            voucher = voucher.code(),
            value = %voucher.value(),
            unit_price,
            "voucher value not representable for line, pricing without voucher"
        );

        LineDiscount::None
    }
}
