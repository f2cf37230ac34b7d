//! Cart line items

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::PricingInfo,
    products::{Product, ProductId, ProductVariant, VariantId},
};

/// Identity of a cart line: the product id, or `product:variant` when a
/// variant is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(String);

impl LineKey {
    /// Builds the key for a product and optional variant.
    #[must_use]
    pub fn new(product: &ProductId, variant: Option<&VariantId>) -> Self {
        match variant {
            Some(variant) => Self(format!("{product}:{variant}")),
            None => Self(product.to_string()),
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LineKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product snapshot, its chosen variant and a quantity.
///
/// The pricing is captured when the line is created and never re-resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem<'a> {
    key: LineKey,
    product: Product<'a>,
    variant: Option<ProductVariant<'a>>,
    quantity: u32,
    pricing: PricingInfo<'a>,
}

impl<'a> CartLineItem<'a> {
    pub(crate) fn new(
        product: &Product<'a>,
        variant: Option<&ProductVariant<'a>>,
        quantity: u32,
        pricing: PricingInfo<'a>,
    ) -> Self {
        Self {
            key: LineKey::new(&product.id, variant.map(|v| &v.id)),
            product: product.clone(),
            variant: variant.cloned(),
            quantity,
            pricing,
        }
    }

    /// Line identity
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Product as it was when the line was created
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Selected variant, if any
    pub fn variant(&self) -> Option<&ProductVariant<'a>> {
        self.variant.as_ref()
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Pricing captured when the line was created
    pub fn pricing(&self) -> &PricingInfo<'a> {
        &self.pricing
    }

    /// Price charged per unit
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.pricing.effective_price()
    }

    /// Unit price multiplied by quantity, in minor units.
    ///
    /// Saturates at the bounds of `i64`.
    pub fn line_total_minor(&self) -> i64 {
        self.unit_price()
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity))
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(self.line_total_minor(), self.unit_price().currency())
    }

    /// Human readable description, e.g. "Farm Fresh Whole Milk (Size: 1 Gallon)".
    pub fn description(&self) -> String {
        match &self.variant {
            Some(variant) => format!(
                "{} ({}: {})",
                self.product.name,
                self.product.variation_label(),
                variant.name
            ),
            None => self.product.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use crate::pricing::resolve_price;

    use super::*;

    #[test]
    fn key_without_variant_is_product_id() {
        let key = LineKey::new(&ProductId::from("1"), None);

        assert_eq!(key.as_str(), "1");
    }

    #[test]
    fn key_with_variant_joins_ids() {
        let key = LineKey::new(&ProductId::from("2"), Some(&VariantId::from("v2-1")));

        assert_eq!(key, LineKey::from("2:v2-1"));
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        let product = Product::new("2", "Milk", Money::from_minor(399, USD));
        let line = CartLineItem::new(&product, None, 3, resolve_price(&product, None));

        assert_eq!(line.line_total(), Money::from_minor(1197, USD));
    }

    #[test]
    fn description_includes_variant() {
        let variant = ProductVariant::new("v2-1", "1 Gallon").with_price(Money::from_minor(599, USD));
        let product = Product::new("2", "Milk", Money::from_minor(399, USD))
            .with_variation_type("Size")
            .with_variant(variant.clone());

        let line = CartLineItem::new(
            &product,
            Some(&variant),
            1,
            resolve_price(&product, Some(&variant)),
        );

        assert_eq!(line.description(), "Milk (Size: 1 Gallon)");
        assert_eq!(line.unit_price(), Money::from_minor(599, USD));
    }
}
