//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Amount must be greater than zero")
        }
        PaymentsServiceError::AmountMismatch { expected } => {
            StatusError::bad_request().brief(format!("Amount must equal the order total of {expected}"))
        }
        PaymentsServiceError::EmptyOrder => StatusError::bad_request().brief("Order has no items"),
        PaymentsServiceError::InvalidArgument(reason) => StatusError::bad_request().brief(reason),
        PaymentsServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        PaymentsServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another customer")
        }
        PaymentsServiceError::OrderNotPending { status } => {
            StatusError::conflict().brief(format!("Order is {status}"))
        }
        PaymentsServiceError::Gateway(source) => {
            error!("payment gateway failure: {source}");

            StatusError::internal_server_error().brief("Payment gateway unavailable")
        }
        PaymentsServiceError::Orders(source) => {
            error!("order lookup failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
