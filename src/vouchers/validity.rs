//! Voucher Validity
//!
//! Caller-facing gate that decides whether a voucher may stay attached to a cart. It combines
//! [`is_applicable`] with the voucher's lifecycle: active flag, end date (plus a grace window),
//! remaining usage and identity verification.

use jiff::{SignedDuration, Timestamp};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::Cart,
    vouchers::{Voucher, applicability::is_applicable},
};

/// How long past its end date a voucher is still honoured.
pub const EXPIRY_GRACE: SignedDuration = SignedDuration::from_mins(30);

/// What the caller knows about the current actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Whether the actor has signed in.
    pub authenticated: bool,
}

impl AuthContext {
    /// A signed-in actor.
    pub const fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }

    /// An anonymous actor.
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
        }
    }
}

/// Reasons a voucher cannot stay attached.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VoucherRejection {
    /// The voucher is switched off.
    #[error("voucher is not active")]
    Inactive,

    /// The end date plus grace window has passed.
    #[error("voucher has expired")]
    Expired,

    /// No redemptions left.
    #[error("voucher has been fully redeemed")]
    UsageExhausted,

    /// The voucher needs a signed-in customer.
    #[error("voucher requires a verified account")]
    VerificationRequired,

    /// The cart does not satisfy the voucher's product or minimum order rules.
    #[error("voucher does not apply to this cart")]
    NotApplicable,
}

/// Every reason `voucher` cannot stay attached to `cart` at `now`. Empty means valid.
pub fn check_voucher_at(
    cart: &Cart<'_>,
    voucher: &Voucher,
    auth: AuthContext,
    now: Timestamp,
) -> SmallVec<[VoucherRejection; 4]> {
    let lifecycle = voucher.lifecycle();
    let mut rejections = SmallVec::new();

    if !lifecycle.active {
        rejections.push(VoucherRejection::Inactive);
    }

    if lifecycle.end_date.is_some_and(|end| is_past_grace(end, now)) {
        rejections.push(VoucherRejection::Expired);
    }

    if lifecycle.remaining_usage == Some(0) {
        rejections.push(VoucherRejection::UsageExhausted);
    }

    if lifecycle.requires_verification && !auth.authenticated {
        rejections.push(VoucherRejection::VerificationRequired);
    }

    if !is_applicable(cart.items(), voucher) {
        rejections.push(VoucherRejection::NotApplicable);
    }

    rejections
}

/// Every reason `voucher` cannot stay attached to `cart` right now.
pub fn check_voucher_for_cart(
    cart: &Cart<'_>,
    voucher: &Voucher,
    auth: AuthContext,
) -> SmallVec<[VoucherRejection; 4]> {
    check_voucher_at(cart, voucher, auth, Timestamp::now())
}

/// Whether `voucher` may stay attached to `cart` at `now`.
pub fn is_voucher_valid_at(
    cart: &Cart<'_>,
    voucher: &Voucher,
    auth: AuthContext,
    now: Timestamp,
) -> bool {
    check_voucher_at(cart, voucher, auth, now).is_empty()
}

/// Whether `voucher` may stay attached to `cart` right now.
pub fn is_voucher_valid_for_cart(cart: &Cart<'_>, voucher: &Voucher, auth: AuthContext) -> bool {
    is_voucher_valid_at(cart, voucher, auth, Timestamp::now())
}

fn is_past_grace(end: Timestamp, now: Timestamp) -> bool {
    // an end date too far out to add the grace window to never expires
    end.checked_add(EXPIRY_GRACE).is_ok_and(|deadline| now > deadline)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::VND};
    use testresult::TestResult;

    use crate::{
        items::CartItem,
        vouchers::{ApplicabilityRule, VoucherLifecycle, VoucherType},
    };

    use super::*;

    fn cart() -> Result<Cart<'static>, crate::cart::CartError> {
        Cart::with_items(
            [CartItem::new("pho-bo", 2, Money::from_minor(50_000, VND))],
            VND,
        )
    }

    fn voucher(lifecycle: VoucherLifecycle) -> Voucher {
        Voucher::new(
            "PHO10",
            VoucherType::PercentOrder,
            Decimal::new(10, 0),
            ApplicabilityRule::AllRequired,
        )
        .with_products(["pho-bo"])
        .with_lifecycle(lifecycle)
    }

    fn end_date() -> Result<Timestamp, jiff::Error> {
        "2026-03-01T12:00:00Z".parse()
    }

    #[test]
    fn valid_voucher_has_no_rejections() -> TestResult {
        let voucher = voucher(VoucherLifecycle {
            end_date: Some(end_date()?),
            remaining_usage: Some(3),
            ..VoucherLifecycle::default()
        });

        let now: Timestamp = "2026-02-01T12:00:00Z".parse()?;

        assert!(check_voucher_at(&cart()?, &voucher, AuthContext::anonymous(), now).is_empty());
        assert!(is_voucher_valid_at(&cart()?, &voucher, AuthContext::anonymous(), now));

        Ok(())
    }

    #[test]
    fn end_date_is_honoured_within_grace_window() -> TestResult {
        let end = end_date()?;
        let voucher = voucher(VoucherLifecycle {
            end_date: Some(end),
            ..VoucherLifecycle::default()
        });

        let within = end.checked_add(SignedDuration::from_mins(29))?;
        let at_edge = end.checked_add(EXPIRY_GRACE)?;
        let after = end.checked_add(SignedDuration::from_mins(31))?;

        assert!(is_voucher_valid_at(&cart()?, &voucher, AuthContext::default(), within));
        assert!(is_voucher_valid_at(&cart()?, &voucher, AuthContext::default(), at_edge));
        assert_eq!(
            check_voucher_at(&cart()?, &voucher, AuthContext::default(), after).as_slice(),
            &[VoucherRejection::Expired]
        );

        Ok(())
    }

    #[test]
    fn lifecycle_rejections_are_all_reported() -> TestResult {
        let voucher = voucher(VoucherLifecycle {
            active: false,
            end_date: None,
            remaining_usage: Some(0),
            requires_verification: true,
        });

        let rejections = check_voucher_at(
            &cart()?,
            &voucher,
            AuthContext::anonymous(),
            end_date()?,
        );

        assert_eq!(
            rejections.as_slice(),
            &[
                VoucherRejection::Inactive,
                VoucherRejection::UsageExhausted,
                VoucherRejection::VerificationRequired,
            ]
        );

        Ok(())
    }

    #[test]
    fn verification_passes_for_authenticated_actor() -> TestResult {
        let voucher = voucher(VoucherLifecycle {
            requires_verification: true,
            ..VoucherLifecycle::default()
        });

        assert!(is_voucher_valid_for_cart(&cart()?, &voucher, AuthContext::authenticated()));
        assert!(!is_voucher_valid_for_cart(&cart()?, &voucher, AuthContext::anonymous()));

        Ok(())
    }

    #[test]
    fn inapplicable_voucher_is_rejected() -> TestResult {
        let voucher = voucher(VoucherLifecycle::default())
            .with_min_order_value(Decimal::new(150_000, 0));

        assert_eq!(
            check_voucher_for_cart(&cart()?, &voucher, AuthContext::default()).as_slice(),
            &[VoucherRejection::NotApplicable]
        );

        Ok(())
    }

    #[test]
    fn rejections_render_messages() {
        assert_eq!(VoucherRejection::Expired.to_string(), "voucher has expired");
    }
}
