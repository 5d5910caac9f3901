//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    auth::authorize_subject, carts::errors::into_status_error, extensions::*, state::State,
};

/// Clear Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearCartResponse {
    /// Number of variants removed
    pub removed: usize,
}

/// Clear Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Empty Cart",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart emptied"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ClearCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;

    authorize_subject(state, depot, user).await?;

    let removed = state
        .app
        .carts
        .clear(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClearCartResponse { removed }))
}
