//! Sessions Config

use clap::Args;

/// Session cookie settings.
#[derive(Debug, Args)]
pub struct SessionsConfig {
    /// Name of the cookie carrying the session token
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "marketplace_session")]
    pub session_cookie_name: String,
}
