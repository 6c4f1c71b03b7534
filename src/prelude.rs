//! Voucher pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    adjustments::{Adjustments, Payable},
    cart::{Cart, CartError},
    display::{DisplayItem, LinePricing, resolve_cart_item_display, resolve_order_item_display},
    items::{CartItem, LineItem, OrderItem, Promotion, PromotionKind},
    orders::{Order, OrderError},
    products::ProductSlug,
    receipt::ReceiptError,
    totals::{Totals, aggregate_cart_totals, aggregate_order_totals},
    vouchers::{
        ApplicabilityRule, Voucher, VoucherLifecycle, VoucherType,
        applicability::{is_applicable, is_eligible},
        validity::{
            AuthContext, EXPIRY_GRACE, VoucherRejection, check_voucher_for_cart,
            is_voucher_valid_at, is_voucher_valid_for_cart,
        },
    },
};
