//! Cart Fixtures

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    cart::Cart,
    fixtures::{FixtureError, parse_currency, parse_percentage, parse_price},
    items::{CartItem, Promotion, PromotionKind},
};

/// Wrapper for carts in YAML
#[derive(Debug, Deserialize)]
pub struct CartsFixture {
    /// Map of cart name -> cart fixture
    pub carts: FxHashMap<String, CartFixture>,
}

/// Cart fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart currency code (e.g., "VND")
    pub currency: String,

    /// Cart lines
    pub items: Vec<CartItemFixture>,
}

/// Cart line fixture
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product slug
    pub product: String,

    /// Variant label
    #[serde(default)]
    pub variant: Option<String>,

    /// Units on the line
    pub quantity: u32,

    /// Unit price (e.g., "50000 VND")
    pub price: String,

    /// Promotion attached to the line
    #[serde(default)]
    pub promotion: Option<PromotionFixture>,

    /// Whether the line is a reward gift
    #[serde(default)]
    pub gift: bool,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Percentage off the product
    ProductPercentage {
        /// Percentage (e.g., "20%" or "0.2")
        percentage: String,
    },

    /// Any other promotion kind; carried but never priced
    Other {
        /// Percentage (e.g., "20%" or "0.2")
        percentage: String,
    },
}

impl TryFrom<PromotionFixture> for Promotion {
    type Error = FixtureError;

    fn try_from(fixture: PromotionFixture) -> Result<Self, Self::Error> {
        match fixture {
            PromotionFixture::ProductPercentage { percentage } => Ok(Promotion::new(
                PromotionKind::ProductPercentage,
                parse_percentage(&percentage)?,
            )),
            PromotionFixture::Other { percentage } => Ok(Promotion::new(
                PromotionKind::Other,
                parse_percentage(&percentage)?,
            )),
        }
    }
}

impl CartFixture {
    /// Convert to a `Cart`
    ///
    /// # Errors
    ///
    /// Returns an error if a price or promotion cannot be parsed, or if a line is priced in a
    /// different currency from the cart.
    pub fn try_into_cart(self) -> Result<Cart<'static>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let items = self
            .items
            .into_iter()
            .map(|fixture| {
                let (minor_units, item_currency) = parse_price(&fixture.price)?;

                let mut item = CartItem::new(
                    fixture.product,
                    fixture.quantity,
                    Money::from_minor(minor_units, item_currency),
                );

                if let Some(promotion) = fixture.promotion {
                    item = item.with_promotion(promotion.try_into()?);
                }

                if let Some(variant) = fixture.variant {
                    item = item.with_variant(variant);
                }

                if fixture.gift {
                    item = item.as_gift();
                }

                Ok(item)
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(Cart::with_items(items, currency)?)
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso::VND;
    use testresult::TestResult;

    use crate::items::LineItem;

    use super::*;

    #[test]
    fn cart_fixture_builds_cart_lines() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str(
            r#"
currency: VND
items:
  - product: pho-bo
    variant: large
    quantity: 2
    price: "50000 VND"
    promotion:
      type: product_percentage
      percentage: "20%"
  - product: tra-da
    quantity: 1
    price: "0 VND"
    gift: true
"#,
        )?;

        let cart = fixture.try_into_cart()?;

        let [pho, tea] = cart.items() else {
            return Err("expected two lines".into());
        };

        assert_eq!(pho.product().as_str(), "pho-bo");
        assert_eq!(pho.variant(), Some("large"));
        assert_eq!(pho.quantity(), 2);
        assert_eq!(pho.original_price(), Money::from_minor(50_000, VND));
        assert_eq!(
            pho.promotion().map(Promotion::percentage),
            Some(&Percentage::from(0.2))
        );
        assert!(!pho.is_gift());
        assert!(tea.is_gift());

        Ok(())
    }

    #[test]
    fn other_promotion_kind_is_carried() -> TestResult {
        let promotion = Promotion::try_from(PromotionFixture::Other {
            percentage: "15%".to_string(),
        })?;

        assert_eq!(promotion.kind(), PromotionKind::Other);

        Ok(())
    }

    #[test]
    fn unknown_cart_currency_is_rejected() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str("currency: XYZ\nitems: []\n")?;

        assert!(matches!(
            fixture.try_into_cart(),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));

        Ok(())
    }
}
