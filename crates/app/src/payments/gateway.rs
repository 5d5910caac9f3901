//! Payment gateway contract.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::payments::PaymentGatewayError;

/// Payment creation request sent to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayPaymentRequest {
    pub amount: Decimal,
    pub description: String,
    pub return_url: String,
    pub metadata: Map<String, Value>,
}

/// A payment as the gateway reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayPayment {
    pub id: String,
    /// Gateway status vocabulary, e.g. `waiting_for_capture`.
    pub status: String,
    pub confirmation_url: Option<String>,
    pub metadata: Map<String, Value>,
}

/// A refund as the gateway reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRefund {
    pub id: String,
    pub status: String,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(
        &self,
        request: GatewayPaymentRequest,
    ) -> Result<GatewayPayment, PaymentGatewayError>;

    /// Capture an authorised payment for `amount`.
    async fn capture_payment(
        &self,
        payment_id: String,
        amount: Decimal,
    ) -> Result<GatewayPayment, PaymentGatewayError>;

    async fn get_payment(&self, payment_id: String) -> Result<GatewayPayment, PaymentGatewayError>;

    async fn refund(
        &self,
        payment_id: String,
        amount: Decimal,
    ) -> Result<GatewayRefund, PaymentGatewayError>;
}
