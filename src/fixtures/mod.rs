//! Fixtures
//!
//! YAML fixture sets of carts and vouchers, laid out as `<base>/carts/<set>.yml` and
//! `<base>/vouchers/<set>.yml`.

use std::{fs, path::PathBuf};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD, VND};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    fixtures::{carts::CartsFixture, vouchers::VouchersFixture},
    vouchers::Voucher,
};

pub mod carts;
pub mod vouchers;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Cart not found
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// Voucher not found
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Carts keyed by fixture name
    carts: FxHashMap<String, Cart<'static>>,

    /// Vouchers keyed by code
    vouchers: FxHashMap<String, Voucher>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            carts: FxHashMap::default(),
            vouchers: FxHashMap::default(),
        }
    }

    /// Load carts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a line is priced in a
    /// different currency from its cart.
    pub fn load_carts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartsFixture = serde_norway::from_str(&contents)?;

        for (key, cart_fixture) in fixture.carts {
            let cart = cart_fixture.try_into_cart()?;

            self.carts.insert(key, cart);
        }

        Ok(self)
    }

    /// Load vouchers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a voucher field is invalid.
    pub fn load_vouchers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("vouchers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: VouchersFixture = serde_norway::from_str(&contents)?;

        for (code, voucher_fixture) in fixture.vouchers {
            let voucher = voucher_fixture.try_into_voucher(&code)?;

            self.vouchers.insert(code, voucher);
        }

        Ok(self)
    }

    /// Load a complete fixture set (carts and vouchers with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_carts(name)?.load_vouchers(name)?;

        Ok(fixture)
    }

    /// Get a cart by its fixture name
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found.
    pub fn cart(&self, name: &str) -> Result<&Cart<'static>, FixtureError> {
        self.carts
            .get(name)
            .ok_or_else(|| FixtureError::CartNotFound(name.to_string()))
    }

    /// Get a voucher by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not found.
    pub fn voucher(&self, code: &str) -> Result<&Voucher, FixtureError> {
        self.vouchers
            .get(code)
            .ok_or_else(|| FixtureError::VoucherNotFound(code.to_string()))
    }

    /// Loaded carts, sorted by name
    pub fn carts(&self) -> Vec<(&str, &Cart<'static>)> {
        let mut carts: Vec<_> = self
            .carts
            .iter()
            .map(|(name, cart)| (name.as_str(), cart))
            .collect();

        carts.sort_by(|(left, _), (right, _)| left.cmp(right));
        carts
    }

    /// Loaded vouchers, sorted by code
    pub fn vouchers(&self) -> Vec<&Voucher> {
        let mut vouchers: Vec<_> = self.vouchers.values().collect();

        vouchers.sort_by(|left, right| left.code().cmp(right.code()));
        vouchers
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a supported ISO currency by code
///
/// # Errors
///
/// Returns an error if the code is not one of the fixture currencies.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "VND" => Ok(VND),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "50000 VND" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// cannot be parsed as a decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "20%" or "0.2") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

/// Parse a plain decimal amount (e.g., "10" or "29000")
///
/// # Errors
///
/// Returns an error if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))
}
