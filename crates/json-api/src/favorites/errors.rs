//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::NotFound => {
            StatusError::not_found().brief("Account or product not found")
        }
        FavoritesServiceError::Forbidden(denial) => {
            StatusError::forbidden().brief(denial.message())
        }
        FavoritesServiceError::InvalidArgument(reason) => StatusError::bad_request().brief(reason),
        FavoritesServiceError::Store(source) => {
            error!("favorites storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
