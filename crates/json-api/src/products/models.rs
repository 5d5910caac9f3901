//! Product Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::products::records::ProductRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The owning seller
    pub seller_id: Uuid,

    pub name: String,

    pub category: String,

    pub image: Option<String>,

    #[salvo(schema(value_type = String))]
    pub rating: Decimal,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            seller_id: product.seller.into(),
            name: product.name,
            category: product.category,
            image: product.image,
            rating: product.rating,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
