//! Pricing
//!
//! Resolves what a product costs for the currently selected variant.

use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::discount_percentage,
    products::{Product, ProductVariant},
};

/// The resolved price of a product selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingInfo<'a> {
    /// Sold at its price, with no regular price or discount to show.
    Simple {
        /// Effective selling price
        price: Money<'a, Currency>,
    },

    /// Sold with a regular price and/or a discount to show.
    Discounted {
        /// Effective selling price
        price: Money<'a, Currency>,

        /// Regular price before the sale, if known
        original_price: Option<Money<'a, Currency>>,

        /// Discount in whole percent points
        percentage: u32,
    },
}

impl<'a> PricingInfo<'a> {
    /// The price actually charged.
    #[must_use]
    pub fn effective_price(&self) -> Money<'a, Currency> {
        match self {
            PricingInfo::Simple { price } | PricingInfo::Discounted { price, .. } => *price,
        }
    }

    /// The regular (struck-through) price, if any.
    #[must_use]
    pub fn original_price(&self) -> Option<Money<'a, Currency>> {
        match self {
            PricingInfo::Simple { .. } => None,
            PricingInfo::Discounted { original_price, .. } => *original_price,
        }
    }

    /// The discount in whole percent points, 0 when there is none.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        match self {
            PricingInfo::Simple { .. } => 0,
            PricingInfo::Discounted { percentage, .. } => *percentage,
        }
    }

    /// Whether a discount badge should be shown.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage() > 0
    }
}

/// Resolve the effective price, regular price and discount of a product for
/// the selected variant.
///
/// Fields are taken from the variant when one is selected, otherwise from the
/// product. Only the selling price falls back from a selected variant to the
/// product. An explicit discount percentage is used verbatim; otherwise it is
/// derived from the regular and selling prices.
pub fn resolve_price<'a>(
    product: &Product<'a>,
    selected: Option<&ProductVariant<'a>>,
) -> PricingInfo<'a> {
    let (price, original_price, explicit_percentage) = match selected {
        Some(variant) => (
            variant.price.unwrap_or(product.price),
            variant.original_price,
            variant.discount_percentage,
        ),
        None => (
            product.price,
            product.original_price,
            product.discount_percentage,
        ),
    };

    let percentage = explicit_percentage.unwrap_or_else(|| {
        original_price.map_or(0, |original| discount_percentage(&original, &price))
    });

    if original_price.is_none() && percentage == 0 {
        PricingInfo::Simple { price }
    } else {
        PricingInfo::Discounted {
            price,
            original_price,
            percentage,
        }
    }
}

/// Resolve the price a product is listed at, using its default variant.
pub fn resolve_list_price<'a>(product: &Product<'a>) -> PricingInfo<'a> {
    resolve_price(product, product.default_variant())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    fn usd<'a>(minor: i64) -> Money<'a, Currency> {
        Money::from_minor(minor, USD)
    }

    fn eggs<'a>() -> Product<'a> {
        Product::new("4", "Free-Range Large Brown Eggs", usd(499))
            .with_original_price(usd(599))
            .with_variation_type("Pack")
            .with_variant(
                ProductVariant::new("v4-1", "12 Count")
                    .with_price(usd(499))
                    .with_original_price(usd(599))
                    .with_discount_percentage(17),
            )
            .with_variant(ProductVariant::new("v4-2", "6 Count").with_price(usd(299)))
    }

    #[test]
    fn product_without_variants_uses_its_price() {
        let product = Product::new("1", "Bananas", usd(149));

        let pricing = resolve_price(&product, None);

        assert_eq!(pricing, PricingInfo::Simple { price: usd(149) });
        assert_eq!(pricing.effective_price(), product.price);
        assert_eq!(pricing.discount_percentage(), 0);
    }

    #[test]
    fn variant_price_of_zero_does_not_fall_back() {
        let free = ProductVariant::new("v0", "Sample").with_price(usd(0));
        let product = Product::new("9", "Tea", usd(450)).with_variant(free.clone());

        let pricing = resolve_price(&product, Some(&free));

        assert_eq!(pricing.effective_price(), usd(0));
    }

    #[test]
    fn variant_without_price_falls_back_to_product() {
        let variant = ProductVariant::new("v1", "Default");
        let product = Product::new("9", "Tea", usd(450)).with_variant(variant.clone());

        let pricing = resolve_price(&product, Some(&variant));

        assert_eq!(pricing.effective_price(), usd(450));
    }

    #[test]
    fn explicit_discount_is_used_verbatim() {
        let product = eggs();
        let variant = product.variant(&"v4-1".into()).cloned();

        let pricing = resolve_price(&product, variant.as_ref());

        assert_eq!(
            pricing,
            PricingInfo::Discounted {
                price: usd(499),
                original_price: Some(usd(599)),
                percentage: 17,
            }
        );
    }

    #[test]
    fn discount_is_derived_when_absent() {
        let variant = ProductVariant::new("v1", "Bag")
            .with_price(usd(800))
            .with_original_price(usd(1000));
        let product = Product::new("5", "Rice", usd(1299)).with_variant(variant.clone());

        let pricing = resolve_price(&product, Some(&variant));

        assert_eq!(pricing.discount_percentage(), 20);
        assert!(pricing.is_discounted());
    }

    #[test]
    fn selected_variant_ignores_product_level_discount() {
        let product = eggs();
        let variant = product.variant(&"v4-2".into()).cloned();

        let pricing = resolve_price(&product, variant.as_ref());

        assert_eq!(pricing, PricingInfo::Simple { price: usd(299) });
    }

    #[test]
    fn product_level_original_price_without_variant() {
        let product = Product::new("4", "Eggs", usd(499)).with_original_price(usd(599));

        let pricing = resolve_price(&product, None);

        assert_eq!(pricing.original_price(), Some(usd(599)));
        assert_eq!(pricing.discount_percentage(), 17);
    }

    #[test]
    fn original_price_not_above_price_gives_zero_discount() {
        let product = Product::new("4", "Eggs", usd(599)).with_original_price(usd(599));

        let pricing = resolve_price(&product, None);

        assert_eq!(pricing.original_price(), Some(usd(599)));
        assert_eq!(pricing.discount_percentage(), 0);
        assert!(!pricing.is_discounted());
    }

    #[test]
    fn list_price_uses_default_variant() {
        let pricing = resolve_list_price(&eggs());

        assert_eq!(pricing.effective_price(), usd(499));
        assert_eq!(pricing.discount_percentage(), 17);
    }
}
