//! Set Variant Price Handler

use std::sync::Arc;

use rust_decimal::Decimal;
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

/// Set Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetPriceRequest {
    #[salvo(schema(value_type = String))]
    pub price: Decimal,
}

/// Set Variant Price Handler
///
/// Orders already holding the variant keep the price they were created with.
#[endpoint(
    tags("variants"),
    summary = "Set Variant Price",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Price changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Price must be positive"),
        (status_code = StatusCode::FORBIDDEN, description = "Variant belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    json: JsonBody<SetPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;

    let variant = state
        .app
        .inventory
        .set_price(requester, variant.into_inner().into(), json.into_inner().price)
        .await
        .map_err(into_status_error)?;

    Ok(Json(variant.into()))
}
