//! Payments: the gateway client and the callback state machine it drives.

mod errors;
mod gateway;
mod http;
mod models;
mod service;

pub use errors::*;
pub use gateway::*;
pub use http::{HttpPaymentGateway, PaymentGatewayConfig};
pub use models::*;
pub use service::*;
