//! Discounts
//!
//! Minor-unit helpers shared by every voucher type and by line promotions.
//!
//! All amounts are integer minor units of the cart currency. Helpers return `None` when a
//! value cannot be represented, and callers degrade that to "no discount".

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::iso::Currency;

/// Convert a percentage into its underlying fraction (`25%` is `0.25`).
pub fn percentage_fraction(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the inner Decimal directly
    *percent * Decimal::ONE
}

/// Apply a fraction to a minor-unit amount, rounding half away from zero.
pub fn fraction_of_minor(fraction: Decimal, minor: i64) -> Option<i64> {
    let minor = Decimal::from_i64(minor)?;

    fraction
        .checked_mul(minor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Apply percentage points (`10` meaning 10%) to a minor-unit amount.
pub fn points_of_minor(points: Decimal, minor: i64) -> Option<i64> {
    fraction_of_minor(points.checked_div(Decimal::ONE_HUNDRED)?, minor)
}

/// Convert a major-unit magnitude (e.g. `12.50` GBP) into minor units of `currency`.
pub fn decimal_to_minor(value: Decimal, currency: &Currency) -> Option<i64> {
    let scale = 10_i64.checked_pow(currency.exponent)?;

    value
        .checked_mul(Decimal::from(scale))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Clamp a per-unit discount so it is never negative and never exceeds the unit price.
pub fn clamp_discount(discount: i64, unit_price: i64) -> i64 {
    discount.clamp(0, unit_price.max(0))
}

/// Per-unit discount of a percentage-points voucher on one unit price.
pub fn percent_discount(points: Decimal, unit_price: i64) -> Option<i64> {
    points_of_minor(points, unit_price).map(|discount| clamp_discount(discount, unit_price))
}

/// Per-unit discount of a fixed-amount voucher, capped at the unit price.
pub fn fixed_discount(amount: i64, unit_price: i64) -> i64 {
    clamp_discount(amount, unit_price)
}

/// Target unit price of a same-price voucher.
///
/// A `value` of at most `1` is a fractional discount (`0.3` pays 70% of the price); anything
/// larger is an absolute target price in major units. The target never exceeds the unit price.
pub fn same_price_target(value: Decimal, unit_price: i64, currency: &Currency) -> Option<i64> {
    let target = if value <= Decimal::ONE {
        fraction_of_minor(Decimal::ONE.checked_sub(value)?, unit_price)?
    } else {
        decimal_to_minor(value, currency)?
    };

    Some(target.clamp(0, unit_price.max(0)))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{GBP, VND};

    use super::*;

    #[test]
    fn percentage_fraction_unwraps_the_fraction() {
        assert_eq!(
            percentage_fraction(&Percentage::from(0.25)),
            Decimal::new(25, 2)
        );
    }

    #[test]
    fn fraction_of_minor_rounds_half_up() {
        assert_eq!(fraction_of_minor(Decimal::new(5, 1), 3), Some(2));
        assert_eq!(fraction_of_minor(Decimal::new(25, 2), 200), Some(50));
    }

    #[test]
    fn fraction_of_minor_overflow_is_none() {
        assert_eq!(fraction_of_minor(Decimal::new(2, 0), i64::MAX), None);
    }

    #[test]
    fn points_of_minor_uses_percentage_points() {
        assert_eq!(points_of_minor(Decimal::new(10, 0), 50_000), Some(5_000));
        assert_eq!(points_of_minor(Decimal::new(125, 1), 1_001), Some(125));
    }

    #[test]
    fn decimal_to_minor_respects_currency_exponent() {
        assert_eq!(decimal_to_minor(Decimal::new(1250, 2), GBP), Some(1_250));
        assert_eq!(decimal_to_minor(Decimal::new(10_000, 0), VND), Some(10_000));
    }

    #[test]
    fn percent_discount_is_capped_at_price() {
        assert_eq!(percent_discount(Decimal::new(150, 0), 1_000), Some(1_000));
        assert_eq!(percent_discount(Decimal::new(-10, 0), 1_000), Some(0));
    }

    #[test]
    fn fixed_discount_is_capped_at_price() {
        assert_eq!(fixed_discount(10_000, 30_000), 10_000);
        assert_eq!(fixed_discount(40_000, 30_000), 30_000);
        assert_eq!(fixed_discount(-5, 30_000), 0);
    }

    #[test]
    fn same_price_target_fractional_value() {
        let target = same_price_target(Decimal::new(3, 1), 45_000, VND);

        assert_eq!(target, Some(31_500));
    }

    #[test]
    fn same_price_target_absolute_value() {
        assert_eq!(
            same_price_target(Decimal::new(29_000, 0), 45_000, VND),
            Some(29_000)
        );
        assert_eq!(
            same_price_target(Decimal::new(60_000, 0), 45_000, VND),
            Some(45_000)
        );
    }

    #[test]
    fn same_price_target_one_means_free() {
        assert_eq!(same_price_target(Decimal::ONE, 45_000, VND), Some(0));
    }
}
