use std::io::Write;

use clap::Args;
use lumina::{catalog::Catalog, pricing::resolve_list_price};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only show products in this category
    #[arg(long)]
    category: Option<String>,

    /// Only show products whose name, description or category matches
    #[arg(long)]
    search: Option<String>,
}

pub(crate) fn run(
    args: &ProductsArgs,
    catalog: &Catalog<'_>,
    mut out: impl Write,
) -> Result<(), CliError> {
    let mut products = catalog.search(args.search.as_deref().unwrap_or_default());

    if let Some(category) = args.category.as_deref() {
        products.retain(|product| product.category.eq_ignore_ascii_case(category));
    }

    let mut builder = Builder::default();

    builder.push_record([
        "ID", "Name", "Category", "Price", "Was", "Off", "Rating", "Badges", "Options",
    ]);

    for product in &products {
        let pricing = resolve_list_price(product);

        let was = pricing
            .original_price()
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let off = match pricing.discount_percentage() {
            0 => String::new(),
            pct => format!("{pct}%"),
        };

        let rating = match (product.rating, product.reviews_count) {
            (Some(rating), Some(reviews)) => format!("{rating} ({reviews})"),
            (Some(rating), None) => rating.to_string(),
            (None, _) => String::new(),
        };

        let options = if product.has_variants() {
            let names: Vec<&str> = product.variants.iter().map(|v| v.name.as_str()).collect();

            format!("{}: {}", product.variation_label(), names.join(", "))
        } else {
            String::new()
        };

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            pricing.effective_price().to_string(),
            was,
            off,
            rating,
            product.badges().join(", "),
            options,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..7), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "{} of {} products", products.len(), catalog.len())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r#"
currency: USD
products:
  - id: "1"
    name: Fresh Organic Bananas
    price: "1.49 USD"
    category: Fruits & Veg
    rating: "4.8"
    reviews_count: 342
    is_best_seller: true
  - id: "4"
    name: Organic Large Brown Eggs
    price: "4.99 USD"
    category: Dairy & Eggs
    variation_type: Pack
    variants:
      - { id: v4-1, name: 12 Count, price: "4.99 USD", original_price: "5.99 USD" }
      - { id: v4-2, name: 6 Count, price: "2.99 USD" }
"#;

    fn render(args: &ProductsArgs) -> Result<String, Box<dyn std::error::Error>> {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let mut out = Vec::new();

        run(args, &catalog, &mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn lists_default_variant_pricing() -> TestResult {
        let rendered = render(&ProductsArgs {
            category: None,
            search: None,
        })?;

        assert!(rendered.contains("Fresh Organic Bananas"));
        assert!(rendered.contains("17%"));
        assert!(rendered.contains("Pack: 12 Count, 6 Count"));
        assert!(rendered.contains("4.8 (342)"));
        assert!(rendered.contains("Best Seller"));
        assert!(rendered.contains("2 of 2 products"));

        Ok(())
    }

    #[test]
    fn filters_by_category() -> TestResult {
        let rendered = render(&ProductsArgs {
            category: Some("dairy & eggs".to_string()),
            search: None,
        })?;

        assert!(!rendered.contains("Bananas"));
        assert!(rendered.contains("1 of 2 products"));

        Ok(())
    }
}
