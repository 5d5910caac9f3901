//! Payments Config

use std::time::Duration;

use clap::Args;
use marketplace_app::payments::PaymentGatewayConfig;

/// Payment gateway settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Payment gateway API root
    #[arg(
        long,
        env = "PAYMENT_GATEWAY_URL",
        default_value = "https://api.yookassa.ru/v3"
    )]
    pub payment_gateway_url: String,

    /// Shop identifier used as the Basic auth user
    #[arg(long, env = "PAYMENT_SHOP_ID")]
    pub payment_shop_id: String,

    /// Shop secret key used as the Basic auth password
    #[arg(long, env = "PAYMENT_SECRET_KEY", hide_env_values = true)]
    pub payment_secret_key: String,

    /// Timeout applied to every gateway request, in seconds
    #[arg(long, env = "PAYMENT_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub payment_timeout_seconds: u64,

    /// Currency code sent with every amount
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "RUB")]
    pub payment_currency: String,

    /// Confirm success/cancel notifications with the gateway before applying them
    #[arg(
        long,
        env = "PAYMENT_VERIFY_CALLBACKS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub payment_verify_callbacks: bool,
}

impl PaymentsConfig {
    /// Gateway client settings.
    #[must_use]
    pub fn gateway(&self) -> PaymentGatewayConfig {
        PaymentGatewayConfig {
            base_url: self.payment_gateway_url.clone(),
            shop_id: self.payment_shop_id.clone(),
            secret_key: self.payment_secret_key.clone(),
            timeout: Duration::from_secs(self.payment_timeout_seconds),
            currency: self.payment_currency.clone(),
        }
    }
}
