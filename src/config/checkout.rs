//! Checkout Config

use clap::Args;
use decimal_percentage::Percentage;
use lumina::checkout::CheckoutPolicy;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::cli::CliError;

/// Checkout surcharge settings, in major units of the catalog currency.
#[derive(Debug, Args)]
pub(crate) struct CheckoutConfig {
    /// Subtotal above which shipping is free
    #[arg(long, env = "LUMINA_FREE_SHIPPING_OVER", default_value = "50.00")]
    pub free_shipping_over: Decimal,

    /// Flat shipping fee below the free shipping threshold
    #[arg(long, env = "LUMINA_SHIPPING_FEE", default_value = "15.00")]
    pub shipping_fee: Decimal,

    /// Tax rate as a fraction of the subtotal
    #[arg(long, env = "LUMINA_TAX_RATE", default_value = "0.08")]
    pub tax_rate: Decimal,
}

impl CheckoutConfig {
    /// Build the checkout policy for a catalog currency.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidAmount`] for negative or oversized amounts.
    pub(crate) fn policy<'a>(
        &self,
        currency: &'a Currency,
    ) -> Result<CheckoutPolicy<'a>, CliError> {
        if self.tax_rate.is_sign_negative() {
            return Err(CliError::InvalidAmount(self.tax_rate.to_string()));
        }

        Ok(CheckoutPolicy {
            free_shipping_over: Money::from_minor(to_minor(self.free_shipping_over)?, currency),
            shipping_fee: Money::from_minor(to_minor(self.shipping_fee)?, currency),
            tax_rate: Percentage::from(self.tax_rate),
        })
    }
}

fn to_minor(amount: Decimal) -> Result<i64, CliError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .filter(|minor| *minor >= 0)
        .ok_or_else(|| CliError::InvalidAmount(amount.to_string()))
}
