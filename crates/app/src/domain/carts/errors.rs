//! Carts service errors.

use thiserror::Error;

use crate::{domain::accounts::models::PurchaseDenial, store::StoreError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("account, product or variant not found")]
    NotFound,

    #[error("{}", .0.message())]
    Forbidden(PurchaseDenial),

    #[error("variant does not belong to the given product")]
    InvalidReference,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            _ => Self::Store(error),
        }
    }
}
