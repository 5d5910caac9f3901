//! Delete Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    auth::authorize_subject, extensions::*, orders::errors::into_status_error, state::State,
};

/// Delete Order Handler
///
/// Pending orders release their reserved stock. Confirmed orders are kept.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is confirmed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer: AccountUuid = req.uuid_query("customerId")?;
    let order = order.into_inner();

    authorize_subject(state, depot, customer).await?;

    state
        .app
        .orders
        .delete_order(order.into(), customer)
        .await
        .map_err(into_status_error)?;

    info!(%order, %customer, "order deleted");

    Ok(StatusCode::NO_CONTENT)
}
