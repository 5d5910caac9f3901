//! Internal-failure mapping for handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Turn an unexpected failure into a bare 500, logging `context` and the
/// source so nothing internal reaches the client.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(context, %source, "internal failure");

            StatusError::internal_server_error()
        })
    }
}
