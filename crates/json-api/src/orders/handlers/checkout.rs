//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use marketplace_app::domain::accounts::records::AccountUuid;

use crate::{
    auth::authorize_subject,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Checkout Handler
///
/// Turns the customer's cart into a pending order, one unit per variant.
/// The cart is emptied only when every item was reserved.
#[endpoint(
    tags("orders"),
    summary = "Checkout Cart",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created from cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Account may not purchase"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(req, depot, res),
    fields(customer = tracing::field::Empty, order = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer: AccountUuid = req.uuid_query("customerId")?;

    let span = tracing::Span::current();
    span.record("customer", tracing::field::display(customer));

    authorize_subject(state, depot, customer).await?;

    let order = state
        .app
        .orders
        .checkout(customer)
        .await
        .map_err(into_status_error)?;

    span.record("order", tracing::field::display(order.uuid));
    info!(items = order.items.len(), total = %order.final_price, "checkout complete");

    res.add_header(LOCATION, format!("/api/order/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
