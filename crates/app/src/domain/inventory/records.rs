//! Variant Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// A price a variant held from `set_at` until the next entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePoint {
    pub price: Decimal,
    pub set_at: Timestamp,
}

/// Variant Record
#[derive(Debug, Clone)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product: ProductUuid,
    pub name: String,
    pub description: String,
    /// Current unit price. Always equal to the last entry of `price_history`.
    pub price: Decimal,
    pub count: u32,
    pub price_history: Vec<PricePoint>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VariantRecord {
    /// When the current price took effect.
    #[must_use]
    pub fn price_changed_at(&self) -> Timestamp {
        self.price_history
            .last()
            .map_or(self.created_at, |point| point.set_at)
    }

    /// The price in force before the current one, if any.
    #[must_use]
    pub fn previous_price(&self) -> Option<PricePoint> {
        self.price_history.iter().rev().nth(1).copied()
    }
}
