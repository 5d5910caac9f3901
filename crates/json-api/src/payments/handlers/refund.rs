//! Refund Payment Handler

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
use tracing::info;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Refund Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundRequest {
    #[salvo(schema(value_type = String))]
    pub amount: Decimal,
}

/// Refund Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefundResponse {
    /// Whether the gateway accepted the refund
    pub accepted: bool,
}

/// Refund Payment Handler
///
/// Best effort. The order keeps its status whatever the gateway answers.
#[endpoint(
    tags("payments"),
    summary = "Refund Payment",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Refund requested"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway failure"),
    ),
)]
pub(crate) async fn handler(
    payment_id: PathParam<String>,
    json: JsonBody<RefundRequest>,
    depot: &mut Depot,
) -> Result<Json<RefundResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.session_account_or_401()?;
    let payment_id = payment_id.into_inner();
    let amount = json.into_inner().amount;

    let accepted = state
        .app
        .payments
        .refund(payment_id.clone(), amount)
        .await
        .map_err(into_status_error)?;

    info!(%user, %payment_id, %amount, accepted, "refund requested");

    Ok(Json(RefundResponse { accepted }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::payments::{PaymentGatewayError, PaymentsServiceError};

    use crate::test_helpers::{Mocks, anonymous_service, session_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("payment/{payment_id}/refund").post(handler)
    }

    #[tokio::test]
    async fn test_refund_accepted() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_refund()
            .once()
            .withf(|id, amount| id == "pay_1" && *amount == Decimal::new(500, 0))
            .return_once(|_, _| Ok(true));

        let mut res = TestClient::post("http://example.com/payment/pay_1/refund")
            .json(&json!({ "amount": "500" }))
            .send(&session_service(mocks, route()))
            .await;

        let body: RefundResponse = res.take_json().await?;

        assert!(body.accepted);

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_amount_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_refund()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::InvalidAmount));

        let res = TestClient::post("http://example.com/payment/pay_1/refund")
            .json(&json!({ "amount": "0" }))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_gateway_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.payments.expect_refund().once().return_once(|_, _| {
            Err(PaymentsServiceError::Gateway(
                PaymentGatewayError::UnexpectedResponse {
                    status: 502,
                    body: String::new(),
                },
            ))
        });

        let res = TestClient::post("http://example.com/payment/pay_1/refund")
            .json(&json!({ "amount": "500" }))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/payment/pay_1/refund")
            .json(&json!({ "amount": "500" }))
            .send(&anonymous_service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
