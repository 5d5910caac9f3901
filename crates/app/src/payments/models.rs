//! Payment Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        orders::records::{OrderStatus, OrderUuid},
    },
    uuids::TypedUuid,
};

/// Local payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    /// Map the gateway vocabulary onto the local tri-state. Statuses the
    /// gateway may add later are treated as still pending.
    #[must_use]
    pub fn from_gateway(status: &str) -> Self {
        match status {
            "succeeded" => Self::Succeeded,
            "canceled" => Self::Failed,
            _ => Self::Pending,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// New Payment Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub order: OrderUuid,
    pub amount: Decimal,
    pub description: Option<String>,
    pub return_url: String,
}

/// A created payment the customer still has to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub payment_id: String,
    pub confirmation_url: Option<String>,
    pub status: PaymentStatus,
}

/// Gateway webhook payload. Every field is optional so that malformed
/// notifications still deserialize and can be dropped deliberately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentNotification {
    #[serde(default)]
    pub event: String,

    #[serde(default)]
    pub object: NotificationObject,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationObject {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl NotificationObject {
    /// `orderId` from the metadata, if present and well formed.
    #[must_use]
    pub fn order(&self) -> Option<OrderUuid> {
        metadata_uuid(&self.metadata, "orderId")
    }

    /// `userId` from the metadata. `Some(None)` means present but malformed.
    #[must_use]
    pub fn user(&self) -> Option<Option<AccountUuid>> {
        self.metadata
            .get("userId")
            .map(|_| metadata_uuid(&self.metadata, "userId"))
    }
}

pub(crate) fn metadata_uuid<T>(
    metadata: &Map<String, Value>,
    key: &str,
) -> Option<TypedUuid<T>> {
    metadata.get(key)?.as_str()?.parse().ok()
}

/// Why a callback was accepted without acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingOrderId,
    UnknownOrder,
    UserMismatch,
    Unverified,
    GatewayFailure,
    StoreFailure,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingOrderId => "missing_order_id",
            Self::UnknownOrder => "unknown_order",
            Self::UserMismatch => "user_mismatch",
            Self::Unverified => "unverified",
            Self::GatewayFailure => "gateway_failure",
            Self::StoreFailure => "store_failure",
        }
    }
}

/// What a callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The order moved to the given status.
    Applied(OrderStatus),

    /// The order already had the status, or was no longer capturable.
    Unchanged(OrderStatus),

    /// An authorised payment was captured for the order's final price.
    Captured,

    /// The event would have moved a terminal order to another status.
    Rejected { from: OrderStatus, to: OrderStatus },

    Dropped(DropReason),

    /// The event type is not one this processor acts on.
    Ignored,
}

impl CallbackOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied(_) => "applied",
            Self::Unchanged(_) => "unchanged",
            Self::Captured => "captured",
            Self::Rejected { .. } => "rejected",
            Self::Dropped(_) => "dropped",
            Self::Ignored => "ignored",
        }
    }
}
