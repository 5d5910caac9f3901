//! Variant Data

use rust_decimal::Decimal;

use crate::domain::inventory::records::VariantUuid;

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub count: u32,
}
