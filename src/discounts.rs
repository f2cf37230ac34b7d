//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Derives the discount, in whole percent points, between a regular price
/// and a selling price.
///
/// Computes `round((original - price) / original * 100)` rounding half away
/// from zero. Returns 0 when the selling price is not below the regular price
/// or the regular price is not positive.
pub fn discount_percentage(
    original_price: &Money<'_, Currency>,
    price: &Money<'_, Currency>,
) -> u32 {
    let original_minor = original_price.to_minor_units();
    let price_minor = price.to_minor_units();

    if original_minor <= 0 || price_minor >= original_minor {
        return 0;
    }

    let (Some(original), Some(price)) = (
        Decimal::from_i64(original_minor),
        Decimal::from_i64(price_minor),
    ) else {
        return 0;
    };

    ((original - price) * Decimal::ONE_HUNDRED)
        .checked_div(original)
        .map(|ratio| ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_u32())
        .unwrap_or(0)
}

/// Calculate the amount in minor units based on a percentage of a minor unit amount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be
/// represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    // `Percentage` hides its inner `Decimal`; multiplying by one exposes it.
    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Converts whole percent points (e.g. 15) to a fractional [`Percentage`] (0.15).
#[must_use]
pub fn percentage_from_points(points: u32) -> Percentage {
    Percentage::from(Decimal::from(points) / Decimal::ONE_HUNDRED)
}
