//! Catalog YAML documents

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    catalog::CatalogError,
    products::{Product, ProductVariant},
};

/// Top level catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price must use (e.g. "USD")
    pub currency: String,

    /// Products, in display order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Product record
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Selling price (e.g., "3.99 USD")
    pub price: String,

    /// Regular price before any sale
    #[serde(default)]
    pub original_price: Option<String>,

    /// Explicit discount in percent points
    #[serde(default)]
    pub discount_percentage: Option<u32>,

    /// Category
    #[serde(default)]
    pub category: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Units in stock
    #[serde(default)]
    pub stock: Option<u32>,

    /// Loyalty points per unit
    #[serde(default)]
    pub loyalty_points: Option<u32>,

    /// Variation label, e.g. "Size"
    #[serde(default)]
    pub variation_type: Option<String>,

    /// Average review rating, out of 5
    #[serde(default)]
    pub rating: Option<Decimal>,

    /// Number of reviews
    #[serde(default)]
    pub reviews_count: Option<u32>,

    /// Selling points
    #[serde(default)]
    pub features: Vec<String>,

    /// Brand name
    #[serde(default)]
    pub brand: Option<String>,

    /// Pack size, e.g. "1 lb"
    #[serde(default)]
    pub weight: Option<String>,

    /// New arrival badge
    #[serde(default)]
    pub is_new: bool,

    /// Best seller badge
    #[serde(default)]
    pub is_best_seller: bool,

    /// Purchasable variants
    #[serde(default)]
    pub variants: Vec<VariantFixture>,
}

/// Variant record
#[derive(Debug, Deserialize)]
pub struct VariantFixture {
    /// Variant id
    pub id: String,

    /// Variant name
    pub name: String,

    /// Selling price
    #[serde(default)]
    pub price: Option<String>,

    /// Regular price before any sale
    #[serde(default)]
    pub original_price: Option<String>,

    /// Explicit discount in percent points
    #[serde(default)]
    pub discount_percentage: Option<u32>,

    /// Units in stock
    #[serde(default)]
    pub stock: Option<u32>,

    /// Loyalty points per unit
    #[serde(default)]
    pub loyalty_points: Option<u32>,
}

impl ProductFixture {
    /// Convert the record into a [`Product`], checking every price is in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed prices, foreign currencies or duplicate variant ids.
    pub fn into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product<'static>, CatalogError> {
        let mut variants: SmallVec<[ProductVariant<'static>; 4]> = SmallVec::new();

        for fixture in self.variants {
            if variants.iter().any(|v| v.id.as_str() == fixture.id) {
                return Err(CatalogError::DuplicateVariant(self.id, fixture.id));
            }

            variants.push(ProductVariant {
                id: fixture.id.into(),
                name: fixture.name,
                price: parse_optional_money(fixture.price.as_deref(), currency)?,
                original_price: parse_optional_money(fixture.original_price.as_deref(), currency)?,
                discount_percentage: fixture.discount_percentage,
                stock: fixture.stock,
                loyalty_points: fixture.loyalty_points,
            });
        }

        Ok(Product {
            price: parse_money(&self.price, currency)?,
            original_price: parse_optional_money(self.original_price.as_deref(), currency)?,
            id: self.id.into(),
            name: self.name,
            discount_percentage: self.discount_percentage,
            variants,
            variation_type: self.variation_type,
            category: self.category,
            description: self.description,
            stock: self.stock,
            loyalty_points: self.loyalty_points,
            rating: self.rating,
            reviews_count: self.reviews_count,
            features: self.features,
            brand: self.brand,
            weight: self.weight,
            is_new: self.is_new,
            is_best_seller: self.is_best_seller,
        })
    }
}

fn parse_money(
    s: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, CatalogError> {
    let (minor_units, price_currency) = parse_price(s)?;

    if price_currency != currency {
        return Err(CatalogError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

fn parse_optional_money(
    s: Option<&str>,
    currency: &'static Currency,
) -> Result<Option<Money<'static, Currency>>, CatalogError> {
    s.map(|s| parse_money(s, currency)).transpose()
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse a supported ISO currency code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for anything but GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_minor_units() -> TestResult {
        let (minor, currency) = parse_price("3.99 USD")?;

        assert_eq!(minor, 399);
        assert_eq!(currency, USD);

        Ok(())
    }

    #[test]
    fn parse_price_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(parse_price("2.325 USD")?.0, 233);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_missing_currency() {
        assert!(matches!(
            parse_price("3.99"),
            Err(CatalogError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_bad_amount() {
        assert!(matches!(
            parse_price("cheap USD"),
            Err(CatalogError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("3.99 JPY"),
            Err(CatalogError::UnknownCurrency(code)) if code == "JPY"
        ));
    }

    #[test]
    fn variant_prices_must_match_catalog_currency() {
        let fixture = ProductFixture {
            id: "2".to_string(),
            name: "Milk".to_string(),
            price: "3.99 USD".to_string(),
            original_price: None,
            discount_percentage: None,
            category: String::new(),
            description: String::new(),
            stock: None,
            loyalty_points: None,
            variation_type: None,
            rating: None,
            reviews_count: None,
            features: Vec::new(),
            brand: None,
            weight: None,
            is_new: false,
            is_best_seller: false,
            variants: vec![VariantFixture {
                id: "v2-1".to_string(),
                name: "1 Gallon".to_string(),
                price: Some("5.99 GBP".to_string()),
                original_price: None,
                discount_percentage: None,
                stock: None,
                loyalty_points: None,
            }],
        };

        assert!(matches!(
            fixture.into_product(USD),
            Err(CatalogError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "GBP"
        ));
    }
}
