//! Favorite Membership Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::{accounts::records::AccountUuid, products::records::ProductUuid};

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Favorite Membership Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavoriteMembershipResponse {
    pub is_favorite: bool,
}

/// Favorite Membership Handler
#[endpoint(
    tags("favorites"),
    summary = "Is Product a Favourite",
    responses(
        (status_code = StatusCode::OK, description = "Membership resolved"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<FavoriteMembershipResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;
    let product: ProductUuid = req.uuid_query("productId")?;

    let is_favorite = state
        .app
        .favorites
        .is_favorite(user, product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoriteMembershipResponse { is_favorite }))
}
