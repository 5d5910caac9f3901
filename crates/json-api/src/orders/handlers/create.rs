//! Create Order Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use marketplace_app::domain::{accounts::records::AccountUuid, orders::data::NewOrder};

use crate::{
    auth::authorize_subject, extensions::*, orders::errors::into_status_error, state::State,
};

/// Create Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    /// Accepted for compatibility and ignored: totals are derived from items.
    #[salvo(schema(value_type = Option<String>))]
    pub total_price: Option<Decimal>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            shipping_address: request.shipping_address,
            billing_address: request.billing_address,
            payment_method: request.payment_method,
        }
    }
}

/// Create Order Handler
///
/// Opens an empty pending order and returns its id.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order id"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Account may not purchase"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<Uuid>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer: AccountUuid = req.uuid_query("customerId")?;

    authorize_subject(state, depot, customer).await?;

    let request = json.into_inner();

    if let Some(total_price) = request.total_price {
        debug!(%total_price, "ignoring client supplied order total");
    }

    let order = state
        .app
        .orders
        .create_order(customer, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.uuid.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::{
        accounts::models::PurchaseDenial,
        orders::{OrdersServiceError, records::OrderUuid},
    };

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{Mocks, TEST_ACCOUNT_UUID, session_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        session_service(mocks, Router::with_path("order").post(handler))
    }

    #[tokio::test]
    async fn test_create_ignores_total_price() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_create_order()
            .once()
            .withf(|customer, order| {
                *customer == TEST_ACCOUNT_UUID
                    && *order
                        == NewOrder {
                            shipping_address: Some("Москва".to_string()),
                            ..NewOrder::default()
                        }
            })
            .return_once(move |customer, _| Ok(make_order(uuid, customer)));

        let mut res = TestClient::post(format!(
            "http://example.com/order?customerId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "totalPrice": 1000, "shippingAddress": "Москва" }))
        .send(&make_service(mocks))
        .await;

        let body: Uuid = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_seller_without_customer_mode_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_create_order()
            .once()
            .return_once(|_, _| {
                Err(OrdersServiceError::Forbidden(
                    PurchaseDenial::SellerModeDisabled,
                ))
            });

        let res = TestClient::post(format!(
            "http://example.com/order?customerId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({}))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
