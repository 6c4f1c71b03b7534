//! Placed orders go through the same pricing as carts, and voucher validity and caller-side
//! adjustments layer on top of the engine's totals.

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::VND};
use testresult::TestResult;

use voucher_pricing::{
    adjustments::Adjustments,
    display::{resolve_cart_item_display, resolve_order_item_display},
    fixtures::Fixture,
    items::{LineItem, OrderItem},
    orders::Order,
    totals::{aggregate_cart_totals, aggregate_order_totals},
    vouchers::{
        ApplicabilityRule, Voucher, VoucherType,
        validity::{AuthContext, EXPIRY_GRACE, VoucherRejection, check_voucher_at},
    },
};

fn vnd<'a>(minor: i64) -> Money<'a, rusty_money::iso::Currency> {
    Money::from_minor(minor, VND)
}

fn order_from_cart(fixture: &Fixture, name: &str) -> TestResult<Order<'static>> {
    let cart = fixture.cart(name)?;

    let items: Vec<OrderItem<'static>> = cart
        .items()
        .iter()
        .zip(1..)
        .map(|(item, line_no)| {
            let order_item = OrderItem::new(
                line_no,
                item.product().clone(),
                item.quantity(),
                item.original_price(),
                item.promotion().copied(),
            );

            if item.is_gift() {
                order_item.as_reward()
            } else {
                order_item
            }
        })
        .collect();

    Ok(Order::with_items(format!("ORD-{name}"), items, cart.currency())?)
}

#[test]
fn orders_price_exactly_like_carts() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;

    for (name, cart) in fixture.carts() {
        let order = order_from_cart(&fixture, name)?;

        for voucher in fixture.vouchers() {
            let cart_items = resolve_cart_item_display(cart, Some(voucher));
            let order_items = resolve_order_item_display(&order, Some(voucher));

            assert_eq!(cart_items, order_items, "{name}/{}", voucher.code());

            let cart_totals = aggregate_cart_totals(&cart_items, Some(voucher), cart.currency());
            let order_totals = aggregate_order_totals(&order_items, Some(voucher));

            assert_eq!(Some(cart_totals), order_totals, "{name}/{}", voucher.code());
        }
    }

    Ok(())
}

#[test]
fn placed_order_keeps_recorded_prices() -> TestResult {
    let order = Order::with_items(
        "ORD-1",
        [
            OrderItem::new(1, "pho-bo", 2, vnd(50_000), None),
            OrderItem::new(2, "tra-da", 2, vnd(0), None).as_reward(),
        ],
        VND,
    )?;

    let voucher = Voucher::new(
        "PHO10",
        VoucherType::PercentOrder,
        Decimal::new(10, 0),
        ApplicabilityRule::AllRequired,
    )
    .with_products(["pho-bo"]);

    let items = resolve_order_item_display(&order, Some(&voucher));
    let totals = aggregate_order_totals(&items, Some(&voucher)).ok_or("missing totals")?;

    assert_eq!(order.reference(), "ORD-1");
    assert_eq!(totals.subtotal_before_discount, vnd(100_000));
    assert_eq!(totals.voucher_discount, vnd(10_000));
    assert_eq!(totals.final_total, vnd(90_000));

    let payable = Adjustments::none()
        .with_delivery_fee(vnd(15_000))
        .with_loyalty_redemption(vnd(5_000))
        .apply(totals)?;

    assert_eq!(payable.totals.final_total, vnd(90_000));
    assert_eq!(payable.amount_due, vnd(100_000));

    Ok(())
}

#[test]
fn voucher_validity_follows_lifecycle() -> TestResult {
    let fixture = Fixture::from_set("scenarios")?;
    let cart = fixture.cart("single-pho")?;

    let before_tet: Timestamp = "2026-02-01T00:00:00Z".parse()?;

    let welcome = fixture.voucher("WELCOME20K")?;

    assert_eq!(
        check_voucher_at(cart, welcome, AuthContext::anonymous(), before_tet).as_slice(),
        &[VoucherRejection::VerificationRequired]
    );
    assert!(check_voucher_at(cart, welcome, AuthContext::authenticated(), before_tet).is_empty());

    let tet = fixture.voucher("TET2026")?;
    let end = tet.lifecycle().end_date.ok_or("missing end date")?;

    let in_grace = end.checked_add(SignedDuration::from_mins(10))?;
    let past_grace = end
        .checked_add(EXPIRY_GRACE)?
        .checked_add(SignedDuration::from_secs(1))?;

    assert!(check_voucher_at(cart, tet, AuthContext::anonymous(), in_grace).is_empty());
    assert_eq!(
        check_voucher_at(cart, tet, AuthContext::anonymous(), past_grace).as_slice(),
        &[VoucherRejection::Expired]
    );

    let sold_out = fixture.voucher("SOLDOUT")?;

    assert_eq!(
        check_voucher_at(cart, sold_out, AuthContext::anonymous(), before_tet).as_slice(),
        &[VoucherRejection::UsageExhausted]
    );

    let big_order = fixture.voucher("BIGORDER10")?;

    assert_eq!(
        check_voucher_at(cart, big_order, AuthContext::anonymous(), before_tet).as_slice(),
        &[VoucherRejection::NotApplicable]
    );

    Ok(())
}
