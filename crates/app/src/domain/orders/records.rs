//! Order Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{
        accounts::records::AccountUuid, inventory::records::VariantUuid,
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order status. `Confirmed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// What applying a status to an order would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Apply,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move order from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }

    /// Check a move to `to`. Only `Pending` may move, and re-applying the
    /// current status is a no-op.
    pub fn transition_to(self, to: Self) -> Result<Transition, InvalidTransition> {
        match (self, to) {
            (from, to) if from == to => Ok(Transition::Unchanged),
            (Self::Pending, Self::Confirmed | Self::Cancelled) => Ok(Transition::Apply),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub variant: VariantUuid,
    pub quantity: u32,
    /// Variant price captured when the item was added.
    pub unit_price: Decimal,
    pub status: OrderStatus,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer: AccountUuid,
    pub items: Vec<OrderItemRecord>,
    pub total: Decimal,
    pub discount: Decimal,
    pub final_price: Decimal,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    pub tracking_number: Option<String>,
    pub status: OrderStatus,
    /// Bumped by the store on every successful save.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    #[must_use]
    pub fn new(uuid: OrderUuid, customer: AccountUuid, now: Timestamp) -> Self {
        Self {
            uuid,
            customer,
            items: Vec::new(),
            total: Decimal::ZERO,
            discount: Decimal::ZERO,
            final_price: Decimal::ZERO,
            shipping_address: None,
            billing_address: None,
            payment_method: None,
            tracking_number: None,
            status: OrderStatus::Pending,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derive `total` and `final_price` from the items and discount.
    pub fn recalculate(&mut self) {
        self.total = self.items.iter().map(OrderItemRecord::line_total).sum();
        self.final_price = (self.total - self.discount).max(Decimal::ZERO);
    }

    /// Set the order status and mirror it onto every item.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;

        for item in &mut self.items {
            item.status = status;
        }
    }

    /// Whether any item references the variant.
    #[must_use]
    pub fn references(&self, variant: VariantUuid) -> bool {
        self.items.iter().any(|item| item.variant == variant)
    }
}
