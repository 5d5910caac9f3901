//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::{auth::AuthServiceError, domain::accounts::AccountsServiceError};

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Account already exists")
        }
        AccountsServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AccountsServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted for this account")
        }
        AccountsServiceError::NotASeller => {
            StatusError::bad_request().brief("Customer mode only applies to sellers")
        }
        AccountsServiceError::Store(source) => {
            error!("account storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn session_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AuthServiceError::Store(source) => {
            error!("session storage failure: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("session token failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
