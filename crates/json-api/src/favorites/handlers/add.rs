//! Add Favorite Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::{accounts::records::AccountUuid, favorites::FavoriteAddition};

use crate::{
    auth::authorize_subject,
    extensions::*,
    favorites::{errors::into_status_error, handlers::FavoriteRequest},
    state::State,
};

/// Add Favorite Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddFavoriteResponse {
    pub success: bool,
    pub message: String,
    pub user_role: String,
}

impl From<FavoriteAddition> for AddFavoriteResponse {
    fn from(addition: FavoriteAddition) -> Self {
        let message = match (addition.success, addition.already_present) {
            (false, _) => "Не удалось добавить товар в избранное, попробуйте ещё раз",
            (true, true) => "Товар уже в избранном",
            (true, false) => "Товар добавлен в избранное",
        };

        Self {
            success: addition.success,
            message: message.to_string(),
            user_role: addition.role.to_string(),
        }
    }
}

/// Add Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Add Product to Favorites",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Outcome of the addition"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Account may not purchase"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<FavoriteRequest>,
    depot: &mut Depot,
) -> Result<Json<AddFavoriteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;

    authorize_subject(state, depot, user).await?;

    let addition = state
        .app
        .favorites
        .add_item(user, json.into_inner().product_id.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(addition.into()))
}
