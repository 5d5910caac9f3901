//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => {
            StatusError::not_found().brief("Order, account or variant not found")
        }
        OrdersServiceError::Unauthorized => {
            StatusError::forbidden().brief("Order belongs to another customer")
        }
        OrdersServiceError::Forbidden(denial) => StatusError::forbidden().brief(denial.message()),
        OrdersServiceError::InvalidArgument(reason) => StatusError::bad_request().brief(reason),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Variant does not belong to the product")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InsufficientStock {
            available,
            requested,
        } => StatusError::conflict().brief(format!(
            "Insufficient stock: {available} available, {requested} requested"
        )),
        OrdersServiceError::InvalidState { status } => {
            StatusError::conflict().brief(format!("Order is {status}"))
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Order cannot move from {from} to {to}"))
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was modified concurrently, retry")
        }
        OrdersServiceError::Store(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
