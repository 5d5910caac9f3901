//! Auth service errors.

use thiserror::Error;

use crate::{auth::SessionTokenError, store::StoreError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("storage error")]
    Store(#[source] StoreError),

    #[error("session token processing error")]
    Token(#[source] SessionTokenError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            _ => Self::Store(error),
        }
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}
