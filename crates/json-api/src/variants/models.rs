//! Variant Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::inventory::records::VariantRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,

    pub product_id: Uuid,

    pub name: String,

    pub description: String,

    /// Current unit price
    #[salvo(schema(value_type = String))]
    pub price: Decimal,

    /// Price before the latest change, if it ever changed
    #[salvo(schema(value_type = Option<String>))]
    pub previous_price: Option<Decimal>,

    pub price_changed_at: String,

    /// Units in stock
    pub count: u32,

    pub created_at: String,

    pub updated_at: String,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into(),
            product_id: variant.product.into(),
            previous_price: variant.previous_price().map(|point| point.price),
            price_changed_at: variant.price_changed_at().to_string(),
            name: variant.name,
            description: variant.description,
            price: variant.price,
            count: variant.count,
            created_at: variant.created_at.to_string(),
            updated_at: variant.updated_at.to_string(),
        }
    }
}
