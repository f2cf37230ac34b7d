//! Lumina
//!
//! Storefront pricing and cart engine: resolves variant prices, keeps a cart
//! ledger of priced line items, and totals an order at checkout.

pub mod admin;
pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod prelude;
pub mod pricing;
pub mod products;
