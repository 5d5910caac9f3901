//! Toggle Customer Mode Handler

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
    accounts::{errors::into_status_error, models::EligibilityResponse},
    auth::authorize_subject,
    extensions::*,
    state::State,
};

/// Customer Mode Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerModeRequest {
    pub enabled: bool,
}

/// Toggle Customer Mode Handler
///
/// Lets a seller opt in to (or out of) purchasing.
#[endpoint(
    tags("accounts"),
    summary = "Set Customer Mode",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer mode updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Account is not a seller"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Session does not own the account"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
    ),
)]
pub(crate) async fn handler(
    account: PathParam<Uuid>,
    json: JsonBody<CustomerModeRequest>,
    depot: &mut Depot,
) -> Result<Json<EligibilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = account.into_inner().into();

    authorize_subject(state, depot, account).await?;

    let eligibility = state
        .app
        .accounts
        .set_customer_mode(account, json.into_inner().enabled)
        .await
        .map_err(into_status_error)?;

    Ok(Json(eligibility.into()))
}
