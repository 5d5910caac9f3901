//! Register Account Handler

use std::sync::Arc;

use salvo::{
    http::{
        cookie::{Cookie, SameSite},
        header::LOCATION,
    },
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use marketplace_app::domain::accounts::{data::NewAccount, records::AccountUuid};

use crate::{
    accounts::{
        errors::{into_status_error, session_status_error},
        models::parse_role,
    },
    extensions::*,
    state::State,
};

/// Register Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterAccountRequest {
    /// `customer` or `seller`
    pub role: String,
}

/// Account Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountRegisteredResponse {
    pub uuid: Uuid,
    pub role: String,
    /// Raw session token. Only ever returned here.
    pub session_token: String,
}

/// Register Account Handler
///
/// Creates a customer or seller account and signs it in.
#[endpoint(
    tags("accounts"),
    summary = "Register Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::FORBIDDEN, description = "Role cannot be self-assigned"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterAccountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AccountRegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let role = parse_role(&json.into_inner().role)?;

    let account = state
        .app
        .accounts
        .register(NewAccount {
            uuid: AccountUuid::new(),
            role,
        })
        .await
        .map_err(into_status_error)?;

    let session = state
        .app
        .auth
        .issue_session(account.uuid)
        .await
        .map_err(session_status_error)?;

    info!(account = %account.uuid, %role, "account registered");

    res.add_cookie(
        Cookie::build((state.session_cookie.clone(), session.token.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );

    res.add_header(LOCATION, format!("/api/accounts/{}", account.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(AccountRegisteredResponse {
        uuid: account.uuid.into(),
        role: account.role.to_string(),
        session_token: session.token,
    }))
}
