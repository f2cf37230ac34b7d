//! Lumina prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{DraftError, ProductDraft, VariantDraft, VariantField},
    assistant::{
        AssistantError, GeminiClient, GeminiConfig, ProductAssistant, TextGenerator, build_prompt,
    },
    cart::{Cart, CartError, CartLineItem, LineKey, parse_quantity},
    catalog::{Catalog, CatalogError},
    checkout::{CheckoutError, CheckoutPolicy, OrderSummary, SummaryLine, complete_checkout},
    discounts::{DiscountError, discount_percentage},
    pricing::{PricingInfo, resolve_list_price, resolve_price},
    products::{Product, ProductId, ProductVariant, VariantId},
};
