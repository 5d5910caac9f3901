//! Favorites service errors.

use thiserror::Error;

use crate::{domain::accounts::models::PurchaseDenial, store::StoreError};

#[derive(Debug, Error)]
pub enum FavoritesServiceError {
    #[error("account or product not found")]
    NotFound,

    #[error("{}", .0.message())]
    Forbidden(PurchaseDenial),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for FavoritesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            _ => Self::Store(error),
        }
    }
}
