use std::io::Write;

use clap::Args;
use lumina::{
    assistant::{ProductAssistant, TextGenerator},
    catalog::Catalog,
    products::ProductId,
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct AskArgs {
    /// Product id
    #[arg(long)]
    product: String,

    /// Question about the product
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
}

pub(crate) async fn run<G: TextGenerator>(
    args: &AskArgs,
    catalog: &Catalog<'_>,
    generator: Option<G>,
    mut out: impl Write,
) -> Result<(), CliError> {
    let product = catalog
        .get(&ProductId::from(args.product.as_str()))
        .ok_or_else(|| CliError::UnknownProduct(args.product.clone()))?;

    let question = args.question.join(" ");
    let answer = ProductAssistant::new(generator).ask(product, &question).await;

    writeln!(out, "{answer}")?;

    Ok(())
}
