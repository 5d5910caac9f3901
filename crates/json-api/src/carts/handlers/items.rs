//! Cart Items Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Items Handler
///
/// Returns the variant ids in the user's cart.
#[endpoint(
    tags("carts"),
    summary = "List Cart Variants",
    responses(
        (status_code = StatusCode::OK, description = "Variant ids in the cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
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
        .carts
        .list_items(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
