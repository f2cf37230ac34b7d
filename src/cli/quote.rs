use std::{io::Write, str::FromStr};

use clap::Args;
use lumina::{
    cart::{Cart, parse_quantity},
    catalog::Catalog,
    checkout::{CheckoutPolicy, OrderSummary, complete_checkout},
    products::{ProductId, VariantId},
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Item to add, as PRODUCT[:VARIANT][=QTY]; repeat for more items
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Complete checkout instead of only quoting
    #[arg(long)]
    checkout: bool,
}

/// A cart addition given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    product: String,
    variant: Option<String>,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidItem(s.to_string());

        let (target, quantity) = match s.split_once('=') {
            Some((target, quantity)) => (target, parse_quantity(quantity)?),
            None => (s, 1),
        };

        let (product, variant) = match target.split_once(':') {
            Some((product, variant)) if !variant.trim().is_empty() => {
                (product, Some(variant.trim().to_string()))
            }
            Some(_) => return Err(invalid()),
            None => (target, None),
        };

        let product = product.trim();

        if product.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            product: product.to_string(),
            variant,
            quantity,
        })
    }
}

pub(crate) fn run<'a>(
    args: &QuoteArgs,
    catalog: &Catalog<'a>,
    policy: &CheckoutPolicy<'a>,
    mut out: impl Write,
) -> Result<(), CliError> {
    let mut cart = Cart::new(catalog.currency());

    for item in &args.items {
        let product = catalog
            .get(&ProductId::from(item.product.as_str()))
            .ok_or_else(|| CliError::UnknownProduct(item.product.clone()))?;

        let variant = item
            .variant
            .as_deref()
            .map(|variant| {
                product.variant(&VariantId::from(variant)).ok_or_else(|| {
                    CliError::UnknownVariant(item.product.clone(), variant.to_string())
                })
            })
            .transpose()?;

        cart.add_item(product, item.quantity, variant)?;
    }

    let summary = if args.checkout {
        complete_checkout(&mut cart, policy)?
    } else {
        OrderSummary::from_cart(&cart, policy)?
    };

    summary.write_to(&mut out)?;

    if args.checkout {
        writeln!(out, "\nOrder placed.")?;
    }

    Ok(())
}
