//! Accounts service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("operation not permitted for this account")]
    Forbidden,

    #[error("customer mode only applies to sellers")]
    NotASeller,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AccountsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::InsufficientStock { .. }
            | StoreError::OutOfRange
            | StoreError::VersionConflict
            | StoreError::Unavailable(_) => Self::Store(error),
        }
    }
}
