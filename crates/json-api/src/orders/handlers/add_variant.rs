//! Add Variant To Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::Span;
use uuid::Uuid;

use marketplace_app::domain::orders::data::NewOrderItem;

use crate::{
    auth::authorize_subject,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Add Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddVariantRequest {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
}

impl From<AddVariantRequest> for NewOrderItem {
    fn from(request: AddVariantRequest) -> Self {
        NewOrderItem {
            product: request.product_id.into(),
            variant: request.variant_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Variant Handler
///
/// Reserves stock and appends the variant at its current price.
#[endpoint(
    tags("orders"),
    summary = "Add Variant To Order",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or order not pending"),
    ),
)]
#[tracing::instrument(
    name = "orders.add_variant",
    skip(order, json, depot, res),
    fields(variant = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<AddVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = Span::current();
    span.record("variant", tracing::field::display(request.variant_id));
    span.record("quantity", request.quantity);

    let existing = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?
        .ok_or_else(|| StatusError::not_found().brief("Order not found"))?;

    authorize_subject(state, depot, existing.customer).await?;

    let updated = state
        .app
        .orders
        .add_item(existing.uuid, request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(updated.into()))
}
