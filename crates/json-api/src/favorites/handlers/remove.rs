//! Remove Favorite Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    auth::authorize_subject,
    extensions::*,
    favorites::{errors::into_status_error, handlers::FavoriteRequest},
    state::State,
};

/// Remove Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Remove Product from Favorites",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product was not a favourite"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<FavoriteRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;

    authorize_subject(state, depot, user).await?;

    let removed = state
        .app
        .favorites
        .remove_item(user, json.into_inner().product_id.into())
        .await
        .map_err(into_status_error)?;

    if !removed {
        return Err(StatusError::not_found().brief("Product is not a favourite"));
    }

    Ok(StatusCode::OK)
}
