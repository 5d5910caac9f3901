//! Variant Models

use rust_decimal::Decimal;

use crate::domain::{
    accounts::records::AccountUuid,
    inventory::records::{VariantRecord, VariantUuid},
    products::records::{ProductRecord, ProductUuid},
};

/// A variant joined with the product and seller it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetails {
    pub uuid: VariantUuid,
    pub product: ProductUuid,
    pub seller: AccountUuid,
    pub product_name: String,
    pub category: String,
    pub image: Option<String>,
    pub rating: Decimal,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub count: u32,
}

impl VariantDetails {
    #[must_use]
    pub fn new(variant: VariantRecord, product: &ProductRecord) -> Self {
        Self {
            uuid: variant.uuid,
            product: product.uuid,
            seller: product.seller,
            product_name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            rating: product.rating,
            name: variant.name,
            description: variant.description,
            price: variant.price,
            count: variant.count,
        }
    }
}
