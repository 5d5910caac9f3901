//! Order Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::orders::records::{OrderItemRecord, OrderRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    /// Price captured when the item was added
    #[salvo(schema(value_type = String))]
    pub unit_price: Decimal,
    #[salvo(schema(value_type = String))]
    pub line_total: Decimal,
    pub status: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_id: item.product.into(),
            variant_id: item.variant.into(),
            quantity: item.quantity,
            line_total: item.line_total(),
            unit_price: item.unit_price,
            status: item.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    /// Sum of every line total
    #[salvo(schema(value_type = String))]
    pub total: Decimal,
    #[salvo(schema(value_type = String))]
    pub discount: Decimal,
    /// Total less discount, never negative
    #[salvo(schema(value_type = String))]
    pub final_price: Decimal,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    pub tracking_number: Option<String>,
    /// `pending`, `confirmed` or `cancelled`
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            customer_id: order.customer.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total: order.total,
            discount: order.discount,
            final_price: order.final_price,
            shipping_address: order.shipping_address,
            billing_address: order.billing_address,
            payment_method: order.payment_method,
            tracking_number: order.tracking_number,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use marketplace_app::domain::{
        accounts::records::AccountUuid,
        orders::records::{OrderRecord, OrderUuid},
    };

    pub(crate) fn make_order(uuid: OrderUuid, customer: AccountUuid) -> OrderRecord {
        OrderRecord::new(uuid, customer, Timestamp::UNIX_EPOCH)
    }
}
