//! Voucher Pricing
//!
//! Line-item pricing and voucher discount engine for food-ordering carts and placed orders.
//! Promotions are resolved per line, vouchers are checked for applicability and then priced
//! either per line or once on the order subtotal, and the result is totalled into a breakdown
//! that always reconciles.

pub mod adjustments;
pub mod cart;
pub mod discounts;
pub mod display;
pub mod fixtures;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod totals;
pub mod utils;
pub mod vouchers;
