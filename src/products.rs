//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// Label shown for a product's variants when it has no variation type.
pub const DEFAULT_VARIATION_LABEL: &str = "Option";

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant identifier, unique within its parent product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(String);

impl VariantId {
    /// Creates a new variant id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchasable option of a product (size, pack, weight...).
///
/// Every pricing field is optional; the resolver in [`crate::pricing`] falls
/// back to the parent product when the selling price is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariant<'a> {
    /// Variant id
    pub id: VariantId,

    /// Display name, e.g. "1 Gallon"
    pub name: String,

    /// Selling price
    pub price: Option<Money<'a, Currency>>,

    /// Regular price before any sale
    pub original_price: Option<Money<'a, Currency>>,

    /// Explicit discount, in percent points
    pub discount_percentage: Option<u32>,

    /// Units in stock
    pub stock: Option<u32>,

    /// Loyalty points earned per unit
    pub loyalty_points: Option<u32>,
}

impl<'a> ProductVariant<'a> {
    /// Creates a variant with no pricing of its own.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: None,
            original_price: None,
            discount_percentage: None,
            stock: None,
            loyalty_points: None,
        }
    }

    /// Sets the selling price.
    #[must_use]
    pub fn with_price(mut self, price: Money<'a, Currency>) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the regular (struck-through) price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: Money<'a, Currency>) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Sets an explicit discount percentage.
    #[must_use]
    pub fn with_discount_percentage(mut self, percentage: u32) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    /// Sets the stock count.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Base selling price.
    ///
    /// Informational only when the product has variants.
    pub price: Money<'a, Currency>,

    /// Regular price before any sale
    pub original_price: Option<Money<'a, Currency>>,

    /// Explicit discount, in percent points
    pub discount_percentage: Option<u32>,

    /// Purchasable variants
    pub variants: SmallVec<[ProductVariant<'a>; 4]>,

    /// What the variants vary by, e.g. "Size"
    pub variation_type: Option<String>,

    /// Category name
    pub category: String,

    /// Long description
    pub description: String,

    /// Units in stock
    pub stock: Option<u32>,

    /// Loyalty points earned per unit
    pub loyalty_points: Option<u32>,

    /// Average review rating, out of 5
    pub rating: Option<Decimal>,

    /// Number of reviews behind the rating
    pub reviews_count: Option<u32>,

    /// Short selling points, e.g. "Organic"
    pub features: Vec<String>,

    /// Brand name
    pub brand: Option<String>,

    /// Pack size shown on the card, e.g. "1 loaf"
    pub weight: Option<String>,

    /// Recently added to the store
    pub is_new: bool,

    /// One of the store's best sellers
    pub is_best_seller: bool,
}

impl<'a> Product<'a> {
    /// Creates a product with the given id, name and price, and no variants.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            discount_percentage: None,
            variants: SmallVec::new(),
            variation_type: None,
            category: String::new(),
            description: String::new(),
            stock: None,
            loyalty_points: None,
            rating: None,
            reviews_count: None,
            features: Vec::new(),
            brand: None,
            weight: None,
            is_new: false,
            is_best_seller: false,
        }
    }

    /// Sets the regular (struck-through) price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: Money<'a, Currency>) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Sets an explicit discount percentage.
    #[must_use]
    pub fn with_discount_percentage(mut self, percentage: u32) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    /// Sets the review rating and count.
    #[must_use]
    pub fn with_rating(mut self, rating: Decimal, reviews_count: u32) -> Self {
        self.rating = Some(rating);
        self.reviews_count = Some(reviews_count);
        self
    }

    /// Adds a selling point.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Flags the product as new.
    #[must_use]
    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Flags the product as a best seller.
    #[must_use]
    pub fn best_seller(mut self) -> Self {
        self.is_best_seller = true;
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a variant.
    #[must_use]
    pub fn with_variant(mut self, variant: ProductVariant<'a>) -> Self {
        self.variants.push(variant);
        self
    }

    /// Sets the variation type label.
    #[must_use]
    pub fn with_variation_type(mut self, variation_type: impl Into<String>) -> Self {
        self.variation_type = Some(variation_type.into());
        self
    }

    /// Whether the product has any purchasable variants.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Look up a variant by id.
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant<'a>> {
        self.variants.iter().find(|variant| &variant.id == id)
    }

    /// The variant selected when the product is first shown, if any.
    pub fn default_variant(&self) -> Option<&ProductVariant<'a>> {
        self.variants.first()
    }

    /// Badges shown on the product card.
    #[must_use]
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();

        if self.is_new {
            badges.push("New");
        }

        if self.is_best_seller {
            badges.push("Best Seller");
        }

        badges
    }

    /// Label for the variant selector, e.g. "Size".
    #[must_use]
    pub fn variation_label(&self) -> &str {
        self.variation_type
            .as_deref()
            .unwrap_or(DEFAULT_VARIATION_LABEL)
    }
}
