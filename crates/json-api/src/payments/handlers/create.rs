//! Create Payment Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::payments::{NewPayment, PaymentIntent};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentRequest {
    pub order_id: Uuid,
    #[salvo(schema(value_type = String))]
    pub amount: Decimal,
    /// Defaults to a generated description when blank
    #[serde(default)]
    pub description: Option<String>,
    pub return_url: String,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(request: CreatePaymentRequest) -> Self {
        NewPayment {
            order: request.order_id.into(),
            amount: request.amount,
            description: request.description,
            return_url: request.return_url,
        }
    }
}

/// Create Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentResponse {
    pub payment_id: String,
    /// Where the customer confirms the payment
    pub confirmation_url: Option<String>,
    /// `pending`, `succeeded` or `failed`
    pub status: String,
}

impl From<PaymentIntent> for CreatePaymentResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            payment_id: intent.payment_id,
            confirmation_url: intent.confirmation_url,
            status: intent.status.to_string(),
        }
    }
}

/// Create Payment Handler
///
/// Starts a gateway payment for one of the session user's pending orders.
#[endpoint(
    tags("payments"),
    summary = "Create Payment",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is not pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway failure"),
    ),
)]
#[tracing::instrument(
    name = "payments.create",
    skip(json, depot),
    fields(order = tracing::field::Empty, payment = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<CreatePaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.session_account_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();
    span.record("order", tracing::field::display(request.order_id));

    let intent = state
        .app
        .payments
        .create_payment(user, request.into())
        .await
        .map_err(into_status_error)?;

    span.record("payment", tracing::field::display(&intent.payment_id));

    Ok(Json(intent.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::{
        domain::orders::records::OrderStatus,
        payments::{PaymentStatus, PaymentsServiceError},
    };

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID, anonymous_service, session_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("payment/create").post(handler)
    }

    fn body(order: Uuid) -> serde_json::Value {
        json!({
            "orderId": order,
            "amount": "1499.00",
            "description": "",
            "returnUrl": "https://shop.example/return",
        })
    }

    #[tokio::test]
    async fn test_create_payment() -> TestResult {
        let order = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_payment()
            .once()
            .withf(move |user, payment| {
                *user == TEST_ACCOUNT_UUID
                    && payment.order.into_uuid() == order
                    && payment.amount == Decimal::new(149_900, 2)
            })
            .return_once(|_, _| {
                Ok(PaymentIntent {
                    payment_id: "pay_1".to_string(),
                    confirmation_url: Some("https://gateway.example/confirm".to_string()),
                    status: PaymentStatus::Pending,
                })
            });

        let mut res = TestClient::post("http://example.com/payment/create")
            .json(&body(order))
            .send(&session_service(mocks, route()))
            .await;

        let body: CreatePaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payment_id, "pay_1");
        assert_eq!(body.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_positive_amount_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::InvalidAmount));

        let res = TestClient::post("http://example.com/payment/create")
            .json(&body(Uuid::now_v7()))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_amount_other_than_order_total_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_payment()
            .once()
            .return_once(|_, _| {
                Err(PaymentsServiceError::AmountMismatch {
                    expected: Decimal::new(30_000, 2),
                })
            });

        let res = TestClient::post("http://example.com/payment/create")
            .json(&body(Uuid::now_v7()))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirmed_order_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_create_payment()
            .once()
            .return_once(|_, _| {
                Err(PaymentsServiceError::OrderNotPending {
                    status: OrderStatus::Confirmed,
                })
            });

        let res = TestClient::post("http://example.com/payment/create")
            .json(&body(Uuid::now_v7()))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/payment/create")
            .json(&body(Uuid::now_v7()))
            .send(&anonymous_service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
