//! Update Order Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use marketplace_app::domain::{accounts::records::AccountUuid, orders::data::OrderUpdate};

use crate::{
    auth::authorize_subject, extensions::*, orders::errors::into_status_error, state::State,
};

/// Update Order Request. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateOrderRequest {
    #[salvo(schema(value_type = Option<String>))]
    pub discount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    /// Accepted for compatibility and ignored: totals are derived from items.
    #[salvo(schema(value_type = Option<String>))]
    pub total_price: Option<Decimal>,
}

impl From<UpdateOrderRequest> for OrderUpdate {
    fn from(request: UpdateOrderRequest) -> Self {
        OrderUpdate {
            discount: request.discount,
            shipping_address: request.shipping_address,
            billing_address: request.billing_address,
            payment_method: request.payment_method,
        }
    }
}

/// Update Order Handler
///
/// Only pending orders can be edited, and only by their customer.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is no longer pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    req: &mut Request,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer: AccountUuid = req.uuid_query("customerId")?;

    authorize_subject(state, depot, customer).await?;

    let request = json.into_inner();

    if let Some(total_price) = request.total_price {
        debug!(%total_price, "ignoring client supplied order total");
    }

    state
        .app
        .orders
        .update_order(order.into_inner().into(), customer, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::orders::{
        OrdersServiceError,
        records::{OrderStatus, OrderUuid},
    };

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{Mocks, TEST_ACCOUNT_UUID, session_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        session_service(mocks, Router::with_path("order/{order}").put(handler))
    }

    #[tokio::test]
    async fn test_update_discount() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_order()
            .once()
            .withf(move |o, requester, update| {
                *o == uuid
                    && *requester == TEST_ACCOUNT_UUID
                    && update.discount == Some(Decimal::new(50, 0))
            })
            .return_once(|order, customer, _| Ok(make_order(order, customer)));

        let res = TestClient::put(format!(
            "http://example.com/order/{uuid}?customerId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "discount": "50", "totalPrice": 1 }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_order_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Unauthorized));

        let res = TestClient::put(format!(
            "http://example.com/order/{}?customerId={TEST_ACCOUNT_UUID}",
            OrderUuid::new()
        ))
        .json(&json!({ "shippingAddress": "Казань" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirmed_order_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| {
                Err(OrdersServiceError::InvalidState {
                    status: OrderStatus::Confirmed,
                })
            });

        let res = TestClient::put(format!(
            "http://example.com/order/{}?customerId={TEST_ACCOUNT_UUID}",
            OrderUuid::new()
        ))
        .json(&json!({ "discount": "10" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
