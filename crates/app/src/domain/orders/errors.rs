//! Orders service errors.

use thiserror::Error;

use crate::{
    domain::{accounts::models::PurchaseDenial, orders::records::OrderStatus},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order, account or variant not found")]
    NotFound,

    #[error("order is owned by another customer")]
    Unauthorized,

    #[error("{}", .0.message())]
    Forbidden(PurchaseDenial),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("variant does not belong to the given product")]
    InvalidReference,

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u64 },

    #[error("order is {status}")]
    InvalidState { status: OrderStatus },

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("cart is empty")]
    EmptyCart,

    #[error("order was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::InsufficientStock {
                available,
                requested,
            } => Self::InsufficientStock {
                available,
                requested,
            },
            StoreError::VersionConflict => Self::Conflict,
            StoreError::OutOfRange => Self::InvalidArgument("quantity out of range"),
            StoreError::AlreadyExists | StoreError::Unavailable(_) => Self::Store(error),
        }
    }
}
