//! Payment errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::orders::{OrdersServiceError, records::OrderStatus};

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// An HTTP transport, timeout or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("amount does not match the order total of {expected}")]
    AmountMismatch { expected: Decimal },

    #[error("order has no items")]
    EmptyOrder,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("order not found")]
    OrderNotFound,

    #[error("order belongs to another customer")]
    Forbidden,

    #[error("order is {status}")]
    OrderNotPending { status: OrderStatus },

    #[error("payment gateway error")]
    Gateway(#[source] PaymentGatewayError),

    #[error("order lookup failed")]
    Orders(#[source] OrdersServiceError),
}

impl From<PaymentGatewayError> for PaymentsServiceError {
    fn from(error: PaymentGatewayError) -> Self {
        Self::Gateway(error)
    }
}

impl From<OrdersServiceError> for PaymentsServiceError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::OrderNotFound,
            _ => Self::Orders(error),
        }
    }
}
