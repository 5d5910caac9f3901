//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    auth::authorize_subject, carts::errors::into_status_error, extensions::*, state::State,
};

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveCartItemRequest {
    pub variant_id: Uuid,
}

/// Remove Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemResponse {
    pub success: bool,
}

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Variant from Cart",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variant removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant was not in the cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<RemoveCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<RemoveCartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;

    authorize_subject(state, depot, user).await?;

    let removed = state
        .app
        .carts
        .remove_item(user, json.into_inner().variant_id.into())
        .await
        .map_err(into_status_error)?;

    if !removed {
        return Err(StatusError::not_found().brief("Variant is not in the cart"));
    }

    Ok(Json(RemoveCartItemResponse { success: true }))
}
