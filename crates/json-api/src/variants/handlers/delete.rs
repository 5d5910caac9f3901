//! Delete Variant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, state::State, variants::errors::into_status_error};

/// Delete Variant Handler
///
/// Refused while the variant sits in a cart or a pending order.
#[endpoint(
    tags("variants"),
    summary = "Delete Variant",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Variant deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Variant belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Variant still referenced"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;
    let variant = variant.into_inner();

    state
        .app
        .inventory
        .delete_variant(requester, variant.into())
        .await
        .map_err(into_status_error)?;

    info!(%variant, %requester, "variant deleted");

    Ok(StatusCode::NO_CONTENT)
}
