//! Command line interface

use std::io;

use clap::Subcommand;
use lumina::{
    cart::CartError,
    catalog::{Catalog, CatalogError},
    checkout::CheckoutError,
};
use thiserror::Error;

use crate::config::Config;

mod ask;
mod products;
mod quote;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("unknown variant {1} for product {0}")]
    UnknownVariant(String, String),

    #[error("invalid item '{0}', expected PRODUCT[:VARIANT][=QTY]")]
    InvalidItem(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List catalog products with their current prices
    Products(products::ProductsArgs),

    /// Price a cart, optionally completing checkout
    Quote(quote::QuoteArgs),

    /// Ask the product assistant a question
    Ask(ask::AskArgs),
}

pub(crate) async fn run(config: Config) -> Result<(), CliError> {
    let catalog = Catalog::load(&config.catalog)?;
    let out = io::stdout();

    match config.command {
        Command::Products(args) => products::run(&args, &catalog, out),
        Command::Quote(args) => {
            let policy = config.checkout.policy(catalog.currency())?;

            quote::run(&args, &catalog, &policy, out)
        }
        Command::Ask(args) => ask::run(&args, &catalog, config.assistant.client(), out).await,
    }
}
