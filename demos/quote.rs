//! Quote Example
//!
//! Prices the carts of a fixture set, optionally with a voucher attached.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to price a single cart from the set
//! Use `-v` to attach a voucher by code
//! Use `RUST_LOG=debug` to see applicability decisions

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use voucher_pricing::{
    adjustments::Adjustments,
    cart::Cart,
    display::resolve_cart_item_display,
    fixtures::Fixture,
    receipt,
    totals::aggregate_cart_totals,
    utils::QuoteArgs,
    vouchers::{
        Voucher,
        validity::{AuthContext, check_voucher_for_cart},
    },
};

/// Quote Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = QuoteArgs::parse();

    let fixture = Fixture::from_set_in(&args.fixtures_dir, &args.fixture)?;

    let voucher = args
        .voucher
        .as_deref()
        .map(|code| fixture.voucher(code))
        .transpose()?;

    let auth = if args.authenticated {
        AuthContext::authenticated()
    } else {
        AuthContext::anonymous()
    };

    let carts = match args.cart.as_deref() {
        Some(name) => vec![(name, fixture.cart(name)?)],
        None => fixture.carts(),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for (name, cart) in carts {
        println!("\nCart: {name}");

        let attached = voucher.filter(|voucher| keep_attached(cart, voucher, auth));

        if let Some(voucher) = attached {
            println!("Voucher: {}", voucher.code());
        }

        let items = resolve_cart_item_display(cart, attached);
        let totals = aggregate_cart_totals(&items, attached, cart.currency());

        receipt::write_to(&mut handle, &items, &totals)?;

        let payable = Adjustments::none().apply(totals)?;

        println!("Amount due: {}", payable.amount_due);
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "Example code")]
fn keep_attached(cart: &Cart<'_>, voucher: &Voucher, auth: AuthContext) -> bool {
    let rejections = check_voucher_for_cart(cart, voucher, auth);

    for rejection in &rejections {
        println!("Voucher {} dropped: {rejection}", voucher.code());
    }

    rejections.is_empty()
}
