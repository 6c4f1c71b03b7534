//! Vouchers
//!
//! A voucher is attached to a cart or order as a whole (zero or one at a time). Its `type`
//! picks the discount policy and its applicability rule picks which lines it touches.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::products::ProductSlug;

pub mod applicability;
pub mod validity;

/// Discount policy of a voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoucherType {
    /// Percentage (in points) off the order or off eligible lines.
    PercentOrder,

    /// Fixed amount off the order or off each eligible line.
    FixedValue,

    /// Pin eligible lines to a target price (or a fractional discount when `value <= 1`).
    SamePriceProduct,

    /// A type this engine does not know; the voucher then has no effect.
    Unrecognized(String),
}

impl From<&str> for VoucherType {
    fn from(value: &str) -> Self {
        match value {
            "PERCENT_ORDER" => Self::PercentOrder,
            "FIXED_VALUE" => Self::FixedValue,
            "SAME_PRICE_PRODUCT" => Self::SamePriceProduct,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PercentOrder => f.write_str("PERCENT_ORDER"),
            Self::FixedValue => f.write_str("FIXED_VALUE"),
            Self::SamePriceProduct => f.write_str("SAME_PRICE_PRODUCT"),
            Self::Unrecognized(other) => f.write_str(other),
        }
    }
}

/// Which lines of a cart or order a voucher applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicabilityRule {
    /// Every line must belong to the voucher's product list, otherwise nothing applies.
    AllRequired,

    /// Only the matching lines are discounted; the rest are priced normally.
    AtLeastOneRequired,

    /// A rule this engine does not know; the voucher then has no effect.
    Unrecognized(String),
}

impl From<&str> for ApplicabilityRule {
    fn from(value: &str) -> Self {
        match value {
            "ALL_REQUIRED" => Self::AllRequired,
            "AT_LEAST_ONE_REQUIRED" => Self::AtLeastOneRequired,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for ApplicabilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllRequired => f.write_str("ALL_REQUIRED"),
            Self::AtLeastOneRequired => f.write_str("AT_LEAST_ONE_REQUIRED"),
            Self::Unrecognized(other) => f.write_str(other),
        }
    }
}

/// Lifecycle state checked before keeping a voucher attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherLifecycle {
    /// Whether the voucher has been switched on.
    pub active: bool,

    /// End of the validity period, if any.
    pub end_date: Option<Timestamp>,

    /// Remaining redemptions; `None` is unlimited.
    pub remaining_usage: Option<u32>,

    /// Whether only authenticated customers may redeem it.
    pub requires_verification: bool,
}

impl Default for VoucherLifecycle {
    fn default() -> Self {
        Self {
            active: true,
            end_date: None,
            remaining_usage: None,
            requires_verification: false,
        }
    }
}

/// Voucher definition
#[derive(Debug, Clone)]
pub struct Voucher {
    code: String,
    kind: VoucherType,
    value: Decimal,
    rule: ApplicabilityRule,
    products: FxHashSet<ProductSlug>,
    min_order_value: Decimal,
    lifecycle: VoucherLifecycle,
}

impl Voucher {
    /// Create an unrestricted voucher with no minimum order value.
    ///
    /// `value` is interpreted according to `kind`: percentage points for
    /// [`VoucherType::PercentOrder`], a major-unit amount for [`VoucherType::FixedValue`], and
    /// either a fraction or a major-unit target price for [`VoucherType::SamePriceProduct`].
    pub fn new(
        code: impl Into<String>,
        kind: VoucherType,
        value: Decimal,
        rule: ApplicabilityRule,
    ) -> Self {
        Self {
            code: code.into(),
            kind,
            value,
            rule,
            products: FxHashSet::default(),
            min_order_value: Decimal::ZERO,
            lifecycle: VoucherLifecycle::default(),
        }
    }

    /// Restrict the voucher to a product list.
    #[must_use]
    pub fn with_products<P: Into<ProductSlug>>(
        mut self,
        products: impl IntoIterator<Item = P>,
    ) -> Self {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    /// Require a minimum subtotal (after promotion, in major units).
    #[must_use]
    pub fn with_min_order_value(mut self, min_order_value: Decimal) -> Self {
        self.min_order_value = min_order_value;
        self
    }

    /// Replace the lifecycle state.
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: VoucherLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Voucher code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount policy
    pub fn kind(&self) -> &VoucherType {
        &self.kind
    }

    /// Raw magnitude; see [`Voucher::new`].
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Applicability rule
    pub fn rule(&self) -> &ApplicabilityRule {
        &self.rule
    }

    /// Products the voucher is restricted to. Empty means unrestricted.
    pub fn products(&self) -> &FxHashSet<ProductSlug> {
        &self.products
    }

    /// Minimum order value in major units.
    pub fn min_order_value(&self) -> Decimal {
        self.min_order_value
    }

    /// Lifecycle state
    pub fn lifecycle(&self) -> &VoucherLifecycle {
        &self.lifecycle
    }

    /// Whether `product` is on the voucher's product list.
    pub fn lists(&self, product: &ProductSlug) -> bool {
        self.products.contains(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_type_parses_known_names() {
        assert_eq!(VoucherType::from("PERCENT_ORDER"), VoucherType::PercentOrder);
        assert_eq!(VoucherType::from("FIXED_VALUE"), VoucherType::FixedValue);
        assert_eq!(
            VoucherType::from("SAME_PRICE_PRODUCT"),
            VoucherType::SamePriceProduct
        );
    }

    #[test]
    fn voucher_type_keeps_unknown_names() {
        let kind = VoucherType::from("BUY_ONE_GET_ONE");

        assert_eq!(kind, VoucherType::Unrecognized("BUY_ONE_GET_ONE".to_string()));
        assert_eq!(kind.to_string(), "BUY_ONE_GET_ONE");
    }

    #[test]
    fn applicability_rule_round_trips_through_display() {
        for name in ["ALL_REQUIRED", "AT_LEAST_ONE_REQUIRED", "SOMETHING_ELSE"] {
            assert_eq!(ApplicabilityRule::from(name).to_string(), name);
        }
    }

    #[test]
    fn voucher_builder_sets_restrictions() {
        let voucher = Voucher::new(
            "PHO10",
            VoucherType::PercentOrder,
            Decimal::new(10, 0),
            ApplicabilityRule::AllRequired,
        )
        .with_products(["pho-bo", "pho-ga"])
        .with_min_order_value(Decimal::new(100_000, 0));

        assert_eq!(voucher.code(), "PHO10");
        assert!(voucher.lists(&ProductSlug::from("pho-ga")));
        assert!(!voucher.lists(&ProductSlug::from("banh-mi")));
        assert_eq!(voucher.min_order_value(), Decimal::new(100_000, 0));
        assert!(voucher.lifecycle().active);
    }
}
