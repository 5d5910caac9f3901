//! Order Data

use rust_decimal::Decimal;

use crate::domain::{inventory::records::VariantUuid, products::records::ProductUuid};

/// New Order Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}

/// New Order Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub variant: VariantUuid,
    pub quantity: u32,
}

/// Customer-editable order fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub discount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}
