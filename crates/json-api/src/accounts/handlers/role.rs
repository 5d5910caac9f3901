//! Set Account Role Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    accounts::{errors::into_status_error, models::parse_role},
    extensions::*,
    state::State,
};

/// Set Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetRoleRequest {
    pub role: String,
}

/// Account Role Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountRoleResponse {
    pub uuid: Uuid,
    pub role: String,
}

/// Set Account Role Handler
///
/// Admin only.
#[endpoint(
    tags("accounts"),
    summary = "Set Account Role",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role changed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Requester is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
    ),
)]
pub(crate) async fn handler(
    account: PathParam<Uuid>,
    json: JsonBody<SetRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<AccountRoleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;
    let role = parse_role(&json.into_inner().role)?;

    let account = state
        .app
        .accounts
        .set_role(requester, account.into_inner().into(), role)
        .await
        .map_err(into_status_error)?;

    info!(%requester, account = %account.uuid, %role, "account role changed");

    Ok(Json(AccountRoleResponse {
        uuid: account.uuid.into(),
        role: account.role.to_string(),
    }))
}
