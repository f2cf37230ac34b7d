//! Checkout
//!
//! Shipping and tax surcharges on top of the cart total, and the order
//! summary shown before payment.

use std::io;

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::Cart,
    discounts::{DiscountError, percent_of_minor, percentage_from_points},
};

/// Errors raised while pricing or completing a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Tax could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The summary could not be written.
    #[error("failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy<'a> {
    /// Shipping is free when the subtotal is strictly above this amount
    pub free_shipping_over: Money<'a, Currency>,

    /// Flat shipping fee otherwise
    pub shipping_fee: Money<'a, Currency>,

    /// Tax charged on the subtotal
    pub tax_rate: Percentage,
}

impl<'a> CheckoutPolicy<'a> {
    /// Free shipping over 50.00, otherwise 15.00, and 8% tax.
    #[must_use]
    pub fn standard(currency: &'a Currency) -> Self {
        Self {
            free_shipping_over: Money::from_minor(5_000, currency),
            shipping_fee: Money::from_minor(1_500, currency),
            tax_rate: percentage_from_points(8),
        }
    }

    /// Shipping charged for a subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: &Money<'a, Currency>) -> Money<'a, Currency> {
        if subtotal.to_minor_units() > self.free_shipping_over.to_minor_units() {
            Money::from_minor(0, subtotal.currency())
        } else {
            self.shipping_fee
        }
    }

    /// Tax charged on a subtotal, rounded to the nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the tax does not fit in minor units.
    pub fn tax_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let tax_minor = percent_of_minor(&self.tax_rate, subtotal.to_minor_units())?;

        Ok(Money::from_minor(tax_minor, subtotal.currency()))
    }
}

/// One row of an order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine<'a> {
    /// Product (and variant) description
    pub description: String,

    /// Number of units
    pub quantity: u32,

    /// Price per unit
    pub unit_price: Money<'a, Currency>,

    /// Unit price times quantity
    pub line_total: Money<'a, Currency>,
}

/// Totals for a cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary<'a> {
    lines: Vec<SummaryLine<'a>>,
    item_count: u64,
    subtotal: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> OrderSummary<'a> {
    /// Price a cart under a checkout policy.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if tax or money arithmetic fails.
    pub fn from_cart(
        cart: &Cart<'a>,
        policy: &CheckoutPolicy<'a>,
    ) -> Result<Self, CheckoutError> {
        let subtotal = cart.total();
        let shipping = policy.shipping_for(&subtotal);
        let tax = policy.tax_for(&subtotal)?;
        let total = subtotal.add(shipping)?.add(tax)?;

        let lines = cart
            .iter()
            .map(|line| SummaryLine {
                description: line.description(),
                quantity: line.quantity(),
                unit_price: line.unit_price(),
                line_total: line.line_total(),
            })
            .collect();

        Ok(Self {
            lines,
            item_count: cart.count(),
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    /// Summary rows, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[SummaryLine<'a>] {
        &self.lines
    }

    /// Number of units across all lines
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Cart total before surcharges
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Shipping charged
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Tax charged
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Amount to pay
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether shipping is free.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }

    /// Writes the summary as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CheckoutError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.description.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}")?;

        let shipping = if self.is_free_shipping() {
            "Free".to_string()
        } else {
            self.shipping.to_string()
        };

        for (label, value) in [
            ("Subtotal:", self.subtotal.to_string()),
            ("Shipping:", shipping),
            ("Tax:", self.tax.to_string()),
            ("Total:", self.total.to_string()),
        ] {
            writeln!(out, " {label:<10}{value:>12}")?;
        }

        Ok(())
    }
}

/// Price the cart, then clear it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or any
/// pricing error; the cart is left untouched on error.
pub fn complete_checkout<'a>(
    cart: &mut Cart<'a>,
    policy: &CheckoutPolicy<'a>,
) -> Result<OrderSummary<'a>, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = OrderSummary::from_cart(cart, policy)?;

    info!(
        items = summary.item_count(),
        total = %summary.total(),
        "checkout completed"
    );

    cart.clear();

    Ok(summary)
}
