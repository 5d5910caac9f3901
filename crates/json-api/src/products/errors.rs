//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Product belongs to another seller")
        }
        ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Referenced => StatusError::conflict()
            .brief("Product variants are still in carts or open orders"),
        ProductsServiceError::Store(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
