//! Voucher Fixtures

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_amount},
    vouchers::{ApplicabilityRule, Voucher, VoucherLifecycle, VoucherType},
};

/// Wrapper for vouchers in YAML
#[derive(Debug, Deserialize)]
pub struct VouchersFixture {
    /// Map of voucher code -> voucher fixture
    pub vouchers: FxHashMap<String, VoucherFixture>,
}

/// Voucher fixture from YAML
#[derive(Debug, Deserialize)]
pub struct VoucherFixture {
    /// Voucher type (e.g., "`PERCENT_ORDER`")
    #[serde(rename = "type")]
    pub kind: String,

    /// Magnitude, read according to the type (e.g., "10" or "29000")
    pub value: String,

    /// Applicability rule (e.g., "`ALL_REQUIRED`")
    pub rule: String,

    /// Product slugs the voucher is restricted to
    #[serde(default)]
    pub products: Vec<String>,

    /// Minimum subtotal after promotion, in major units
    #[serde(default)]
    pub min_order_value: Option<String>,

    /// Whether the voucher is switched on
    #[serde(default = "default_active")]
    pub active: bool,

    /// End of the validity period (RFC 3339)
    #[serde(default)]
    pub end_date: Option<String>,

    /// Remaining redemptions; absent means unlimited
    #[serde(default)]
    pub remaining_usage: Option<u32>,

    /// Whether only authenticated customers may redeem it
    #[serde(default)]
    pub requires_verification: bool,
}

fn default_active() -> bool {
    true
}

impl VoucherFixture {
    /// Convert to a `Voucher` with the given code
    ///
    /// Unknown types and rules are kept as [`VoucherType::Unrecognized`] and
    /// [`ApplicabilityRule::Unrecognized`].
    ///
    /// # Errors
    ///
    /// Returns an error if an amount or the end date cannot be parsed.
    pub fn try_into_voucher(self, code: &str) -> Result<Voucher, FixtureError> {
        let value = parse_amount(&self.value)?;

        let min_order_value = self
            .min_order_value
            .as_deref()
            .map(parse_amount)
            .transpose()?
            .unwrap_or_default();

        let end_date = self
            .end_date
            .as_deref()
            .map(|raw| {
                raw.parse::<Timestamp>()
                    .map_err(|err| FixtureError::InvalidTimestamp(format!("{raw}: {err}")))
            })
            .transpose()?;

        let lifecycle = VoucherLifecycle {
            active: self.active,
            end_date,
            remaining_usage: self.remaining_usage,
            requires_verification: self.requires_verification,
        };

        Ok(Voucher::new(
            code,
            VoucherType::from(self.kind.as_str()),
            value,
            ApplicabilityRule::from(self.rule.as_str()),
        )
        .with_products(self.products)
        .with_min_order_value(min_order_value)
        .with_lifecycle(lifecycle))
    }
}
