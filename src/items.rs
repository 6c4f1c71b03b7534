//! Items
//!
//! Cart lines and placed-order lines share one pricing rule set. [`LineItem`] is the adapter
//! the resolver and aggregator are written against, so both shapes go through the same code.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{clamp_discount, fraction_of_minor, percentage_fraction},
    products::ProductSlug,
};

/// Kind of promotion attached to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    /// Percentage discount on a single product. The only kind that prices a line.
    ProductPercentage,

    /// Any other promotion kind; carried through but never priced here.
    Other,
}

/// Promotion already known at the item level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Promotion {
    kind: PromotionKind,
    percentage: Percentage,
}

impl Promotion {
    /// Create a per-product percentage promotion.
    pub fn product_percentage(percentage: Percentage) -> Self {
        Self::new(PromotionKind::ProductPercentage, percentage)
    }

    /// Create a promotion of the given kind.
    pub fn new(kind: PromotionKind, percentage: Percentage) -> Self {
        Self { kind, percentage }
    }

    /// Promotion kind
    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Promotion percentage
    pub fn percentage(&self) -> &Percentage {
        &self.percentage
    }

    /// Per-unit discount in minor units, clamped to `[0, unit_price]`.
    ///
    /// Promotions that are not [`PromotionKind::ProductPercentage`] discount nothing.
    pub fn discount_on(&self, unit_price: i64) -> i64 {
        if self.kind != PromotionKind::ProductPercentage {
            return 0;
        }

        let Some(discount) = fraction_of_minor(percentage_fraction(&self.percentage), unit_price)
        else {
            tracing::warn!(unit_price, "promotion discount not representable, ignoring");

            return 0;
        };

        clamp_discount(discount, unit_price)
    }
}

/// A priced line the engine can resolve.
pub trait LineItem<'a> {
    /// Product the line belongs to.
    fn product(&self) -> &ProductSlug;

    /// Units on the line.
    fn quantity(&self) -> u32;

    /// Unit price before any discount.
    fn original_price(&self) -> Money<'a, Currency>;

    /// Promotion attached to the line, if any.
    fn promotion(&self) -> Option<&Promotion>;

    /// Whether the line was obtained as a reward rather than bought.
    fn is_gift(&self) -> bool {
        false
    }

    /// Lines with no units take no part in applicability checks or totals.
    fn counts(&self) -> bool {
        self.quantity() > 0
    }

    /// Unit price in minor units that every discount and total is computed from. A negative
    /// price is malformed and priced as zero.
    fn unit_price_minor(&self) -> i64 {
        self.original_price().to_minor_units().max(0)
    }

    /// Per-unit promotion discount in minor units, ignoring any voucher.
    fn promotion_discount_minor(&self) -> i64 {
        self.promotion()
            .map_or(0, |promotion| promotion.discount_on(self.unit_price_minor()))
    }
}

/// A line in an in-progress cart.
#[derive(Debug, Clone)]
pub struct CartItem<'a> {
    product: ProductSlug,
    variant: Option<String>,
    quantity: u32,
    original_price: Money<'a, Currency>,
    promotion: Option<Promotion>,
    gift: bool,
}

impl<'a> CartItem<'a> {
    /// Create a cart line with no promotion.
    pub fn new(
        product: impl Into<ProductSlug>,
        quantity: u32,
        original_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product: product.into(),
            variant: None,
            quantity,
            original_price,
            promotion: None,
            gift: false,
        }
    }

    /// Attach a promotion.
    #[must_use]
    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Label the product variant (size, topping set...).
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Flag the line as a reward gift.
    #[must_use]
    pub fn as_gift(mut self) -> Self {
        self.gift = true;
        self
    }

    /// Variant label
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

impl<'a> LineItem<'a> for CartItem<'a> {
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

/// A line of an order that has already been placed.
///
/// The unit price is the one recorded when the order was placed.
#[derive(Debug, Clone)]
pub struct OrderItem<'a> {
    line_no: u32,
    product: ProductSlug,
    quantity: u32,
    ordered_price: Money<'a, Currency>,
    applied_promotion: Option<Promotion>,
    reward: bool,
}

impl<'a> OrderItem<'a> {
    /// Create an order line.
    pub fn new(
        line_no: u32,
        product: impl Into<ProductSlug>,
        quantity: u32,
        ordered_price: Money<'a, Currency>,
        applied_promotion: Option<Promotion>,
    ) -> Self {
        Self {
            line_no,
            product: product.into(),
            quantity,
            ordered_price,
            applied_promotion,
            reward: false,
        }
    }

    /// Flag the line as redeemed from a reward.
    #[must_use]
    pub fn as_reward(mut self) -> Self {
        self.reward = true;
        self
    }

    /// Position of the line within its order.
    pub fn line_no(&self) -> u32 {
        self.line_no
    }
}

impl<'a> LineItem<'a> for OrderItem<'a> {
    fn product(&self) -> &ProductSlug {
        &self.product
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn original_price(&self) -> Money<'a, Currency> {
        self.ordered_price
    }

    fn promotion(&self) -> Option<&Promotion> {
        self.applied_promotion.as_ref()
    }

    fn is_gift(&self) -> bool {
        self.reward
    }
}
