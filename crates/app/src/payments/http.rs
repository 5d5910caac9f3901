//! HTTP client for the payment gateway.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::payments::{
    GatewayPayment, GatewayPaymentRequest, GatewayRefund, PaymentGateway, PaymentGatewayError,
};

/// Configuration for connecting to the payment gateway.
#[derive(Clone)]
pub struct PaymentGatewayConfig {
    /// API root, e.g. `"https://api.yookassa.ru/v3"`.
    pub base_url: String,

    pub shop_id: String,

    pub secret_key: String,

    /// Applied to every request, connect to last byte.
    pub timeout: Duration,

    /// ISO 4217 code sent with every amount.
    pub currency: String,
}

impl fmt::Debug for PaymentGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentGatewayConfig")
            .field("base_url", &self.base_url)
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"**redacted**")
            .field("timeout", &self.timeout)
            .field("currency", &self.currency)
            .finish()
    }
}

/// Gateway client using shop-credential Basic authentication.
///
/// Requests are never retried here. Every POST carries a fresh
/// `Idempotence-Key`, so a caller that retries should reuse the same request.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: PaymentGatewayConfig,
    http: Client,
    authorization: String,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PaymentGatewayConfig) -> Result<Self, PaymentGatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        let credentials = BASE64.encode(format!("{}:{}", config.shop_id, config.secret_key));

        Ok(Self {
            authorization: format!("Basic {credentials}"),
            config,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn amount(&self, value: Decimal) -> AmountBody {
        AmountBody {
            value: format!("{:.2}", value.round_dp(2)),
            currency: self.config.currency.clone(),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.url(path))
            .header("Authorization", &self.authorization)
            .header("Idempotence-Key", Uuid::now_v7().to_string())
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        request: RequestBuilder,
    ) -> Result<T, PaymentGatewayError> {
        let response = request.send().await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: Response) -> Result<Response, PaymentGatewayError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Err(PaymentGatewayError::UnexpectedResponse { status, body })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_payment(
        &self,
        request: GatewayPaymentRequest,
    ) -> Result<GatewayPayment, PaymentGatewayError> {
        let body = CreatePaymentBody {
            amount: self.amount(request.amount),
            capture: false,
            confirmation: ConfirmationRequest {
                kind: "redirect",
                return_url: request.return_url,
            },
            description: request.description,
            metadata: request.metadata,
        };

        let payment: PaymentBody = Self::send(self.post("payments").json(&body)).await?;

        Ok(payment.into())
    }

    async fn capture_payment(
        &self,
        payment_id: String,
        amount: Decimal,
    ) -> Result<GatewayPayment, PaymentGatewayError> {
        let body = CaptureBody {
            amount: self.amount(amount),
        };

        let payment: PaymentBody = Self::send(
            self.post(&format!("payments/{payment_id}/capture"))
                .json(&body),
        )
        .await?;

        Ok(payment.into())
    }

    async fn get_payment(&self, payment_id: String) -> Result<GatewayPayment, PaymentGatewayError> {
        let request = self
            .http
            .get(self.url(&format!("payments/{payment_id}")))
            .header("Authorization", &self.authorization);

        let payment: PaymentBody = Self::send(request).await?;

        Ok(payment.into())
    }

    async fn refund(
        &self,
        payment_id: String,
        amount: Decimal,
    ) -> Result<GatewayRefund, PaymentGatewayError> {
        let body = RefundRequestBody {
            payment_id,
            amount: self.amount(amount),
        };

        let refund: RefundBody = Self::send(self.post("refunds").json(&body)).await?;

        Ok(GatewayRefund {
            id: refund.id,
            status: refund.status,
        })
    }
}

#[derive(Debug, Serialize)]
struct AmountBody {
    value: String,
    currency: String,
}

#[derive(Debug, Serialize)]
struct ConfirmationRequest {
    #[serde(rename = "type")]
    kind: &'static str,
    return_url: String,
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody {
    amount: AmountBody,
    capture: bool,
    confirmation: ConfirmationRequest,
    description: String,
    metadata: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct CaptureBody {
    amount: AmountBody,
}

#[derive(Debug, Serialize)]
struct RefundRequestBody {
    payment_id: String,
    amount: AmountBody,
}

#[derive(Debug, Deserialize)]
struct ConfirmationBody {
    confirmation_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentBody {
    id: String,
    status: String,
    #[serde(default)]
    confirmation: Option<ConfirmationBody>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl From<PaymentBody> for GatewayPayment {
    fn from(body: PaymentBody) -> Self {
        Self {
            id: body.id,
            status: body.status,
            confirmation_url: body
                .confirmation
                .and_then(|confirmation| confirmation.confirmation_url),
            metadata: body.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefundBody {
    id: String,
    status: String,
}
