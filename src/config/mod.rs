//! CLI configuration

use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::Command,
    config::{
        assistant::AssistantConfig, checkout::CheckoutConfig, observability::LoggingConfig,
    },
};

pub(crate) mod assistant;
pub(crate) mod checkout;
pub(crate) mod observability;

/// Lumina storefront CLI configuration
#[derive(Debug, Parser)]
#[command(name = "lumina", about = "Lumina storefront CLI", long_about = None)]
pub(crate) struct Config {
    /// Path to the YAML product catalog
    #[arg(long, env = "LUMINA_CATALOG", default_value = "fixtures/catalog.yml")]
    pub catalog: PathBuf,

    /// Checkout surcharges.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Product assistant model settings.
    #[command(flatten)]
    pub assistant: AssistantConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
