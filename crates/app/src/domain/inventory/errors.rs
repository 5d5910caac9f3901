//! Inventory service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("variant not found")]
    NotFound,

    #[error("variant name already used by this product")]
    AlreadyExists,

    #[error("variant is not owned by the requester")]
    Forbidden,

    #[error("price must be greater than zero")]
    InvalidPrice,

    #[error("invalid data")]
    InvalidData,

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u64 },

    #[error("variant is referenced by a cart or an open order")]
    Referenced,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for InventoryServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::InsufficientStock {
                available,
                requested,
            } => Self::InsufficientStock {
                available,
                requested,
            },
            StoreError::OutOfRange => Self::InvalidData,
            StoreError::VersionConflict | StoreError::Unavailable(_) => Self::Store(error),
        }
    }
}
