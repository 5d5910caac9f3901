//! Server Config

use std::time::Duration;

use clap::Args;

/// Listener and shutdown settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 30_u64)]
    pub shutdown_grace_seconds: u64,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` stops the server without waiting.
    #[must_use]
    pub fn shutdown_grace(&self) -> Option<Duration> {
        (self.shutdown_grace_seconds > 0).then(|| Duration::from_secs(self.shutdown_grace_seconds))
    }
}
