//! Products service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("product is not owned by the requester")]
    Forbidden,

    #[error("invalid data")]
    InvalidData,

    #[error("product variants are still referenced by carts or open orders")]
    Referenced,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::OutOfRange => Self::InvalidData,
            StoreError::InsufficientStock { .. }
            | StoreError::VersionConflict
            | StoreError::Unavailable(_) => Self::Store(error),
        }
    }
}
