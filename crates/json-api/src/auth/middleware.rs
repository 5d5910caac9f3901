//! Session middleware.

use std::sync::Arc;

use marketplace_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve the session token, if any, into the account it belongs to.
///
/// Requests without a token pass through anonymously; endpoints that need a
/// session reject them later. A token that does not resolve is a 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let Some(token) = extract_token(req, &state.session_cookie) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let account = match state.app.auth.authenticate(&token).await {
        Ok(account) => account,
        Err(AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid session"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Store(source)) => {
            error!("failed to validate session: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_session_account(account);

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn extract_token(req: &Request, cookie_name: &str) -> Option<String> {
    if let Some(token) = extract_bearer_token(req) {
        return Some(token.to_string());
    }

    req.cookie(cookie_name)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
