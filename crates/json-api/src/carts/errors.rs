//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Account, product or variant not found")
        }
        CartsServiceError::Forbidden(denial) => StatusError::forbidden().brief(denial.message()),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Variant does not belong to the product")
        }
        CartsServiceError::InvalidArgument(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::Store(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
