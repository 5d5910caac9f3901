//! Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentStatusResponse {
    pub payment_id: String,
    /// `pending`, `succeeded` or `failed`
    pub status: String,
}

/// Payment Status Handler
///
/// Polls the gateway. Local order state is not touched.
#[endpoint(
    tags("payments"),
    summary = "Check Payment Status",
    responses(
        (status_code = StatusCode::OK, description = "Payment status"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway failure"),
    ),
)]
pub(crate) async fn handler(
    payment_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PaymentStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment_id = payment_id.into_inner();

    let status = state
        .app
        .payments
        .check_status(payment_id.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaymentStatusResponse {
        payment_id,
        status: status.to_string(),
    }))
}
