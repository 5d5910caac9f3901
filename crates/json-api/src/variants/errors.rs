//! Variant Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::inventory::InventoryServiceError;

pub(crate) fn into_status_error(error: InventoryServiceError) -> StatusError {
    match error {
        InventoryServiceError::NotFound => {
            StatusError::not_found().brief("Product or variant not found")
        }
        InventoryServiceError::AlreadyExists => {
            StatusError::conflict().brief("Variant name already used by this product")
        }
        InventoryServiceError::Forbidden => {
            StatusError::forbidden().brief("Variant belongs to another seller")
        }
        InventoryServiceError::InvalidPrice => {
            StatusError::bad_request().brief("Price must be greater than zero")
        }
        InventoryServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid variant payload")
        }
        InventoryServiceError::InsufficientStock {
            available,
            requested,
        } => StatusError::conflict().brief(format!(
            "Insufficient stock: {available} available, {requested} requested"
        )),
        InventoryServiceError::Referenced => {
            StatusError::conflict().brief("Variant is in a cart or an open order")
        }
        InventoryServiceError::Store(source) => {
            error!("inventory storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
