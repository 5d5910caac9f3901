//! Healthcheck

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Server build version
    pub version: String,
}

/// Liveness probe. Needs no session and touches no service.
#[endpoint(tags("health"), summary = "Liveness probe")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
