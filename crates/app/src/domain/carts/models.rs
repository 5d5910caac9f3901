//! Cart Models

use rust_decimal::Decimal;

use crate::domain::{
    accounts::records::Role,
    inventory::{models::VariantDetails, records::VariantUuid},
    products::records::ProductUuid,
};

/// Result of adding a variant to a cart.
///
/// `success` reports whether the cart now holds the variant. It is `false`
/// only when the store failed to persist the change, so callers can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartAddition {
    pub success: bool,
    /// The variant was already in the cart and nothing changed.
    pub already_present: bool,
    pub role: Role,
}

/// Display-ready cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub variant: VariantUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub variant_name: String,
    pub price: Decimal,
    pub available: u32,
    pub image: Option<String>,
    pub category: String,
    pub rating: Decimal,
}

impl From<VariantDetails> for CartLine {
    fn from(details: VariantDetails) -> Self {
        Self {
            variant: details.uuid,
            product: details.product,
            product_name: details.product_name,
            variant_name: details.name,
            price: details.price,
            available: details.count,
            image: details.image,
            category: details.category,
            rating: details.rating,
        }
    }
}
