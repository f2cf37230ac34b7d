//! End to end pricing against the bundled grocery catalog.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use lumina::prelude::*;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog.yml");

fn usd<'a>(minor: i64) -> Money<'a, rusty_money::iso::Currency> {
    Money::from_minor(minor, USD)
}

#[test]
fn bundled_catalog_loads() -> TestResult {
    let catalog = Catalog::load(CATALOG)?;

    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.currency(), USD);
    assert_eq!(
        catalog.categories(),
        [
            "Fruits & Veg",
            "Dairy & Eggs",
            "Bakery",
            "Pantry",
            "Meat & Seafood",
            "Beverages"
        ]
    );

    Ok(())
}

#[test]
fn bundled_catalog_carries_card_details() -> TestResult {
    let catalog = Catalog::load(CATALOG)?;

    let bananas = catalog.get(&"1".into()).ok_or("missing bananas")?;
    assert_eq!(bananas.rating, Some(Decimal::new(48, 1)));
    assert_eq!(bananas.reviews_count, Some(342));
    assert_eq!(bananas.weight.as_deref(), Some("1 bunch (approx. 6)"));
    assert_eq!(bananas.badges(), ["Best Seller"]);

    let bread = catalog.get(&"3".into()).ok_or("missing bread")?;
    assert_eq!(bread.badges(), ["New"]);
    assert_eq!(bread.features.len(), 3);

    Ok(())
}

#[test]
fn list_prices_follow_first_variant() -> TestResult {
    let catalog = Catalog::load(CATALOG)?;

    let eggs = catalog.get(&"4".into()).ok_or("missing eggs")?;
    let pricing = resolve_list_price(eggs);

    assert_eq!(pricing.effective_price(), usd(499));
    assert_eq!(pricing.original_price(), Some(usd(599)));
    assert_eq!(pricing.discount_percentage(), 17);

    let chicken = catalog.get(&"7".into()).ok_or("missing chicken")?;
    let two_lbs = chicken.variant(&"v7-2".into()).ok_or("missing 2 lbs")?;

    // Stored percentage is used verbatim even though 16.99/17.98 derives 6.
    assert_eq!(resolve_price(chicken, Some(two_lbs)).discount_percentage(), 5);

    let milk = catalog.get(&"2".into()).ok_or("missing milk")?;
    let half = milk.variant(&"v2-2".into()).ok_or("missing half gallon")?;

    assert!(matches!(
        resolve_price(milk, Some(half)),
        PricingInfo::Simple { price } if price == usd(399)
    ));

    Ok(())
}

#[test]
fn checkout_of_catalog_cart() -> TestResult {
    let catalog = Catalog::load(CATALOG)?;
    let policy = CheckoutPolicy::standard(catalog.currency());
    let mut cart = Cart::new(catalog.currency());

    let bananas = catalog.get(&"1".into()).ok_or("missing bananas")?;
    let rice = catalog.get(&"5".into()).ok_or("missing rice")?;
    let ten_kg = rice.variant(&"v5-2".into()).ok_or("missing 10 kg")?;
    let milk = catalog.get(&"2".into()).ok_or("missing milk")?;

    cart.add_item(bananas, 2, None)?;
    cart.add_item(rice, 2, Some(ten_kg))?;
    // No variant given: milk is sold as its first variant, 1 Gallon.
    cart.add_item(milk, 1, None)?;

    let summary = complete_checkout(&mut cart, &policy)?;

    // 2 x 1.49 + 2 x 22.99 + 5.99 = 54.95, over the free shipping threshold
    assert_eq!(summary.subtotal(), usd(5495));
    assert!(summary.is_free_shipping());
    // 54.95 * 8% = 4.396
    assert_eq!(summary.tax(), usd(440));
    assert_eq!(summary.total(), usd(5935));
    assert_eq!(summary.item_count(), 5);
    assert!(
        summary
            .lines()
            .iter()
            .any(|line| line.description == "Farm Fresh Whole Milk (Size: 1 Gallon)")
    );
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn admin_draft_joins_catalog() -> TestResult {
    let mut catalog = Catalog::load(CATALOG)?;

    let mut draft = ProductDraft::new("9");
    draft.name = "Greek Yogurt".to_string();
    draft.category = "Dairy & Eggs".to_string();
    draft.price = "6.00".to_string();
    draft.discount_percentage = "25".to_string();

    let product = catalog.insert(draft.build(USD)?)?.clone();

    assert_eq!(resolve_price(&product, None).effective_price(), usd(450));
    assert_eq!(catalog.in_category("Dairy & Eggs").count(), 3);
    assert!(matches!(
        catalog.insert(product),
        Err(CatalogError::DuplicateProduct(id)) if id == "9"
    ));

    Ok(())
}
