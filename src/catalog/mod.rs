//! Catalog
//!
//! A read-only list of products, loaded from YAML, standing in for the
//! storefront's remote product table.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::products::{Product, ProductId};

pub mod fixture;

use fixture::{CatalogFixture, parse_currency};

/// Catalog loading and editing errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price is not in the catalog currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two variants of one product share an id (product id, variant id)
    #[error("Duplicate variant id {1} on product {0}")]
    DuplicateVariant(String, String),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog<'static> {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// product is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&contents)?;

        info!(
            path = %path.display(),
            products = catalog.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, a price is malformed or in a
    /// foreign currency, or an id is duplicated.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let currency = parse_currency(&fixture.currency)?;
        let mut catalog = Catalog::new(currency);

        for product_fixture in fixture.products {
            catalog.insert(product_fixture.into_product(currency)?)?;
        }

        Ok(catalog)
    }
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Add a product at the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or the price is in another currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<&Product<'a>, CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id.to_string()));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                self.currency.iso_alpha_code.to_string(),
                product_currency.iso_alpha_code.to_string(),
            ));
        }

        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);

        let Some(product) = self.products.last() else {
            unreachable!("a product was just pushed")
        };

        Ok(product)
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.index.get(id).and_then(|idx| self.products.get(*idx))
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Distinct category names, in the order first seen.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in &self.products {
            let category = product.category.as_str();

            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }

        categories
    }

    /// Products in the given category (case-insensitive).
    pub fn in_category<'s>(&'s self, category: &'s str) -> impl Iterator<Item = &'s Product<'a>> {
        self.products
            .iter()
            .filter(move |product| product.category.eq_ignore_ascii_case(category))
    }

    /// Products whose name, description or category contains `query`
    /// (case-insensitive). An empty query matches every product.
    pub fn search(&self, query: &str) -> Vec<&Product<'a>> {
        let needle = query.trim().to_lowercase();

        self.products
            .iter()
            .filter(|product| {
                needle.is_empty()
                    || product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r#"
currency: USD
products:
  - id: "1"
    name: Fresh Organic Bananas
    price: "1.49 USD"
    category: Fruits & Veg
    description: Sweet and creamy.
  - id: "2"
    name: Farm Fresh Whole Milk
    price: "3.99 USD"
    category: Dairy & Eggs
    variation_type: Size
    variants:
      - id: v2-1
        name: 1 Gallon
        price: "5.99 USD"
        stock: 50
      - id: v2-2
        name: Half Gallon
        price: "3.99 USD"
  - id: "6"
    name: Fresh Red Tomatoes
    price: "2.49 USD"
    category: Fruits & Veg
    description: Juicy and ripe.
"#;

    #[test]
    fn parses_products_in_order() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["1", "2", "6"]);
        assert_eq!(catalog.currency(), USD);

        Ok(())
    }

    #[test]
    fn parses_variants() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let milk = catalog.get(&"2".into()).ok_or("missing milk")?;

        assert_eq!(milk.variants.len(), 2);
        assert_eq!(milk.variation_label(), "Size");

        let gallon = milk.variant(&"v2-1".into()).ok_or("missing variant")?;
        assert_eq!(gallon.price, Some(Money::from_minor(599, USD)));
        assert_eq!(gallon.stock, Some(50));

        Ok(())
    }

    #[test]
    fn parses_card_details() -> TestResult {
        let yaml = r#"
currency: USD
products:
  - id: "3"
    name: Artisan Sourdough Bread
    price: "5.49 USD"
    rating: "4.7"
    reviews_count: 89
    features: [Freshly Baked, Natural Yeast]
    brand: Lumina Bakery
    weight: 1 loaf
    is_new: true
  - { id: "6", name: Fresh Red Tomatoes, price: "2.49 USD" }
"#;
        let catalog = Catalog::from_yaml_str(yaml)?;

        let bread = catalog.get(&"3".into()).ok_or("missing bread")?;
        assert_eq!(bread.rating, Some(Decimal::new(47, 1)));
        assert_eq!(bread.reviews_count, Some(89));
        assert_eq!(bread.features, ["Freshly Baked", "Natural Yeast"]);
        assert_eq!(bread.brand.as_deref(), Some("Lumina Bakery"));
        assert_eq!(bread.weight.as_deref(), Some("1 loaf"));
        assert_eq!(bread.badges(), ["New"]);

        let tomatoes = catalog.get(&"6".into()).ok_or("missing tomatoes")?;
        assert_eq!(tomatoes.rating, None);
        assert!(tomatoes.features.is_empty());
        assert!(tomatoes.badges().is_empty());

        Ok(())
    }

    #[test]
    fn categories_are_deduplicated() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert_eq!(catalog.categories(), ["Fruits & Veg", "Dairy & Eggs"]);
        assert_eq!(catalog.in_category("fruits & veg").count(), 2);

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let names: Vec<&str> = catalog
            .search("RIPE")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();

        assert_eq!(names, ["Fresh Red Tomatoes"]);
        assert_eq!(catalog.search("  ").len(), 3);

        Ok(())
    }

    #[test]
    fn duplicate_product_is_rejected() {
        let yaml = r#"
currency: USD
products:
  - { id: "1", name: A, price: "1.00 USD" }
  - { id: "1", name: B, price: "2.00 USD" }
"#;

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateProduct(id)) if id == "1"
        ));
    }

    #[test]
    fn duplicate_variant_is_rejected() {
        let yaml = r#"
currency: USD
products:
  - id: "1"
    name: A
    price: "1.00 USD"
    variants:
      - { id: v1, name: Small }
      - { id: v1, name: Large }
"#;

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateVariant(product, variant)) if product == "1" && variant == "v1"
        ));
    }

    #[test]
    fn insert_rejects_foreign_currency() {
        let mut catalog = Catalog::new(USD);

        let result = catalog.insert(Product::new("7", "Tea", Money::from_minor(300, GBP)));

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        file.write_all(YAML.as_bytes())?;

        let catalog = Catalog::load(file.path())?;

        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            Catalog::load("does/not/exist.yml"),
            Err(CatalogError::Io(_))
        ));
    }
}
