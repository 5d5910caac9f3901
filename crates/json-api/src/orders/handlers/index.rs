//! Customer Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Customer Orders Handler
///
/// Lists the orders of `customerId`.
#[endpoint(
    tags("orders"),
    summary = "List Customer Orders",
    responses(
        (status_code = StatusCode::OK, description = "Customer orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer: AccountUuid = req.uuid_query("customerId")?;

    let orders = state
        .app
        .orders
        .list_customer_orders(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
