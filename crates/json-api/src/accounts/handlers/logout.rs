//! Sign Out Handler

use std::sync::Arc;

use salvo::{http::cookie::Cookie, prelude::*};
use tracing::warn;

use crate::{
    accounts::errors::session_status_error, auth::middleware::extract_token, extensions::*,
    state::State,
};

/// Sign Out Handler
///
/// Revokes the current session and clears the cookie.
#[endpoint(
    tags("accounts"),
    summary = "Sign Out",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.session_account_or_401()?;

    let token = extract_token(req, &state.session_cookie).ok_or_else(StatusError::unauthorized)?;

    let revoked = state
        .app
        .auth
        .revoke_session(&token)
        .await
        .map_err(session_status_error)?;

    if !revoked {
        warn!(%account, "session was already revoked");
    }

    res.remove_cookie(&state.session_cookie);

    Ok(StatusCode::NO_CONTENT)
}
