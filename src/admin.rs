//! Admin product editor
//!
//! Form state for creating a product from the dashboard, and the rules that
//! turn the raw form strings into a [`Product`].

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    products::{Product, ProductVariant},
};

/// Errors raised when building a product from a draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// The product name is blank.
    #[error("product name is required")]
    MissingName,

    /// A price field could not be parsed.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// The discount is not a number between 0 and 100.
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    /// Variations are enabled but no row has a name.
    #[error("at least one named variation is required")]
    NoVariants,

    /// The only variation row cannot be removed.
    #[error("cannot remove the last variation row")]
    LastVariantRow,

    /// The discount could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Editable field of a variation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantField {
    /// Display name
    Name,
    /// Regular price
    RegularPrice,
    /// Optional sale price
    SalePrice,
    /// Stock count
    Stock,
}

/// One variation row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantDraft {
    /// Row id, also used as the variant id
    pub id: String,
    /// Display name
    pub name: String,
    /// Regular price
    pub regular_price: String,
    /// Optional sale price, used when below the regular price
    pub sale_price: String,
    /// Stock count
    pub stock: String,
}

impl VariantDraft {
    /// Creates an empty row.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// The "add product" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product id
    pub id: String,
    /// Product name
    pub name: String,
    /// Category
    pub category: String,
    /// Description
    pub description: String,
    /// Base price, used when variations are off
    pub price: String,
    /// Discount in percent points (fractions allowed), used when variations are off
    pub discount_percentage: String,
    /// Stock count
    pub stock: String,
    /// Loyalty points per unit
    pub loyalty_points: String,
    /// Variation label, e.g. "Size"
    pub variation_type: String,
    /// Whether the product is sold in variations
    pub has_variations: bool,
    variants: Vec<VariantDraft>,
    next_row: u32,
}

impl ProductDraft {
    /// Creates a blank form with a single empty variation row.
    pub fn new(id: impl Into<String>) -> Self {
        let mut draft = Self {
            id: id.into(),
            name: String::new(),
            category: String::new(),
            description: String::new(),
            price: String::new(),
            discount_percentage: String::new(),
            stock: String::new(),
            loyalty_points: String::new(),
            variation_type: String::new(),
            has_variations: false,
            variants: Vec::new(),
            next_row: 0,
        };

        draft.add_variant_row();
        draft
    }

    /// Variation rows, in form order.
    #[must_use]
    pub fn variant_rows(&self) -> &[VariantDraft] {
        &self.variants
    }

    /// Append an empty variation row and return its id.
    pub fn add_variant_row(&mut self) -> String {
        self.next_row += 1;

        let row_id = format!("{}-v{}", self.id, self.next_row);
        self.variants.push(VariantDraft::new(row_id.clone()));

        row_id
    }

    /// Remove a variation row. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::LastVariantRow`] when only one row is left.
    pub fn remove_variant_row(&mut self, row_id: &str) -> Result<(), DraftError> {
        if self.variants.len() <= 1 {
            return Err(DraftError::LastVariantRow);
        }

        self.variants.retain(|row| row.id != row_id);

        Ok(())
    }

    /// Set one field of a variation row. Returns false for unknown ids.
    pub fn update_variant_row(&mut self, row_id: &str, field: VariantField, value: &str) -> bool {
        let Some(row) = self.variants.iter_mut().find(|row| row.id == row_id) else {
            return false;
        };

        let target = match field {
            VariantField::Name => &mut row.name,
            VariantField::RegularPrice => &mut row.regular_price,
            VariantField::SalePrice => &mut row.sale_price,
            VariantField::Stock => &mut row.stock,
        };

        value.clone_into(target);

        true
    }

    /// Build the product the form describes.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] if the name is blank, the base price or
    /// discount is invalid (without variations), or no variation row is named
    /// (with variations).
    pub fn build<'a>(&self, currency: &'a Currency) -> Result<Product<'a>, DraftError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let mut product = if self.has_variations {
            self.build_with_variants(name, currency)?
        } else {
            self.build_simple(name, currency)?
        };

        product.category = self.category.trim().to_string();
        product.description = self.description.trim().to_string();
        product.stock = parse_count(&self.stock);
        product.loyalty_points = parse_count(&self.loyalty_points);

        Ok(product)
    }

    fn build_simple<'a>(
        &self,
        name: &str,
        currency: &'a Currency,
    ) -> Result<Product<'a>, DraftError> {
        let base = parse_minor(&self.price)
            .ok_or_else(|| DraftError::InvalidPrice(self.price.clone()))?;
        let discount = parse_discount(&self.discount_percentage)?;

        let product = Product::new(self.id.as_str(), name, Money::from_minor(base, currency));

        if discount.is_zero() {
            return Ok(product);
        }

        let off = percent_of_minor(&Percentage::from(discount / Decimal::ONE_HUNDRED), base)?;

        // Stored as whole points for display; the price uses the exact rate.
        let points = discount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .ok_or_else(|| DraftError::InvalidDiscount(self.discount_percentage.clone()))?;

        let mut product = product
            .with_original_price(Money::from_minor(base, currency))
            .with_discount_percentage(points);
        product.price = Money::from_minor(base.saturating_sub(off), currency);

        Ok(product)
    }

    fn build_with_variants<'a>(
        &self,
        name: &str,
        currency: &'a Currency,
    ) -> Result<Product<'a>, DraftError> {
        let variants: SmallVec<[ProductVariant<'a>; 4]> = self
            .variants
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| variant_from_row(row, currency))
            .collect();

        let min_minor = variants
            .iter()
            .filter_map(|variant| variant.price.map(|price| price.to_minor_units()))
            .min()
            .ok_or(DraftError::NoVariants)?;

        let mut product = Product::new(
            self.id.as_str(),
            name,
            Money::from_minor(min_minor, currency),
        );
        product.variants = variants;

        let variation_type = self.variation_type.trim();
        if !variation_type.is_empty() {
            product.variation_type = Some(variation_type.to_string());
        }

        Ok(product)
    }
}

/// Regular price defaults to 0; a sale price is used only when positive and
/// below the regular price. The discount is left for the resolver to derive.
fn variant_from_row<'a>(row: &VariantDraft, currency: &'a Currency) -> ProductVariant<'a> {
    let regular = parse_minor(&row.regular_price).unwrap_or(0);
    let sale = parse_minor(&row.sale_price).filter(|sale| *sale > 0 && *sale < regular);

    let variant = ProductVariant::new(row.id.as_str(), row.name.trim());

    let variant = match sale {
        Some(sale) => variant
            .with_price(Money::from_minor(sale, currency))
            .with_original_price(Money::from_minor(regular, currency)),
        None => variant.with_price(Money::from_minor(regular, currency)),
    };

    match parse_count(&row.stock) {
        Some(stock) => variant.with_stock(stock),
        None => variant,
    }
}

/// Parse a decimal amount (e.g. "3.99") into minor units, rounding half
/// away from zero.
fn parse_minor(s: &str) -> Option<i64> {
    s.trim()
        .parse::<Decimal>()
        .ok()?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// A blank discount is no discount.
fn parse_discount(s: &str) -> Result<Decimal, DraftError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|discount| (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(discount))
        .ok_or_else(|| DraftError::InvalidDiscount(s.to_string()))
}

fn parse_count(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}
