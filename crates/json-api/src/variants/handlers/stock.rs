//! Update Variant Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, models::VariantResponse},
};

/// Update Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStockRequest {
    /// Signed change to apply to the stock count
    pub delta: i64,
}

/// Update Variant Stock Handler
#[endpoint(
    tags("variants"),
    summary = "Adjust Variant Stock",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::FORBIDDEN, description = "Variant belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    json: JsonBody<UpdateStockRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;

    let variant = state
        .app
        .inventory
        .update_stock(requester, variant.into_inner().into(), json.into_inner().delta)
        .await
        .map_err(into_status_error)?;

    Ok(Json(variant.into()))
}
