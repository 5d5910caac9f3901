//! Server configuration module

use clap::Parser;

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsConfig,
    server::ServerRuntimeConfig,
    sessions::SessionsConfig,
};

pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;
pub(crate) mod sessions;

/// Marketplace JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "marketplace-json", about = "Marketplace JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Session cookie settings.
    #[command(flatten)]
    pub sessions: SessionsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
