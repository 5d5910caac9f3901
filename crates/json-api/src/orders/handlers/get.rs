//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?
        .ok_or_else(|| StatusError::not_found().brief("Order not found"))?;

    Ok(Json(order.into()))
}
