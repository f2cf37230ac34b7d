//! Cart
//!
//! An explicitly owned ledger of line items. Callers create one per session
//! and pass it by reference to whatever needs to read or change it.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::resolve_price,
    products::{Product, ProductVariant},
};

mod line_item;

pub use line_item::{CartLineItem, LineKey};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity was below 1, negative or not an integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Adding to a line would overflow its quantity.
    #[error("Quantity overflow for line {0}")]
    QuantityOverflow(LineKey),

    /// The item's price is in a different currency to the cart (item currency, cart currency).
    #[error("Item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Parse a textual quantity for [`Cart::add_item`].
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] for anything that is not an integer of at least 1.
pub fn parse_quantity(input: &str) -> Result<u32, CartError> {
    match input.trim().parse::<u32>() {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(CartError::InvalidQuantity(input.to_string())),
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of a product (and optional variant) to the cart.
    ///
    /// A new line captures the resolved price at this instant. Adding to an
    /// existing line only increases its quantity and keeps its position and
    /// captured price.
    ///
    /// A product with variants is never sold at its base price: with no
    /// variant given, its default (first) variant is used.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: quantity is 0.
    /// - [`CartError::CurrencyMismatch`]: the resolved price is not in the cart currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    pub fn add_item(
        &mut self,
        product: &Product<'a>,
        quantity: u32,
        variant: Option<&ProductVariant<'a>>,
    ) -> Result<&CartLineItem<'a>, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity.to_string()));
        }

        let variant = match variant {
            Some(variant) => Some(variant),
            None => product.default_variant(),
        };

        let key = LineKey::new(&product.id, variant.map(|v| &v.id));

        if let Some(idx) = self.position(&key) {
            let Some(line) = self.lines.get_mut(idx) else {
                unreachable!("position always returns an index within bounds")
            };

            let merged = line
                .quantity()
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(key.clone()))?;

            line.set_quantity(merged);

            debug!(line = %key, quantity = merged, "increased cart line quantity");

            return Ok(&*line);
        }

        let pricing = resolve_price(product, variant);
        let item_currency = pricing.effective_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        debug!(
            line = %key,
            quantity,
            unit_price = %pricing.effective_price(),
            "added cart line"
        );

        self.lines
            .push(CartLineItem::new(product, variant, quantity, pricing));

        let Some(line) = self.lines.last() else {
            unreachable!("a line was just pushed")
        };

        Ok(line)
    }

    /// Remove a line. Returns the removed line, or `None` if the key is unknown.
    pub fn remove_item(&mut self, key: &LineKey) -> Option<CartLineItem<'a>> {
        let idx = self.position(key)?;
        let removed = self.lines.remove(idx);

        debug!(line = %key, "removed cart line");

        Some(removed)
    }

    /// Replace the quantity of a line in place.
    ///
    /// A quantity of 0 removes the line. Unknown keys are ignored. Returns the
    /// updated line, if it still exists.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> Option<&CartLineItem<'a>> {
        if quantity == 0 {
            self.remove_item(key);
            return None;
        }

        let line = self.lines.iter_mut().find(|line| line.key() == key)?;
        line.set_quantity(quantity);

        debug!(line = %key, quantity, "set cart line quantity");

        Some(&*line)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");

        self.lines.clear();
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// Exact in minor units; saturates at the bounds of `i64`.
    pub fn total(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.line_total_minor()));

        Money::from_minor(minor, self.currency)
    }

    /// Sum of quantities over every line.
    pub fn count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Look up a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&CartLineItem<'a>> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|line| line.key() == key)
    }
}
