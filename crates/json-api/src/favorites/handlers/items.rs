//! Favorite Items Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Favorite Items Handler
///
/// Returns the product ids the user has favourited.
#[endpoint(
    tags("favorites"),
    summary = "List Favourite Products",
    responses(
        (status_code = StatusCode::OK, description = "Favourite product ids"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<Uuid>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;

    let items = state
        .app
        .favorites
        .list_items(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
