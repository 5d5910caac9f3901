//! Account Models

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::accounts::{models::Eligibility, records::Role};

/// Parse a role name from a request body.
pub(crate) fn parse_role(role: &str) -> Result<Role, StatusError> {
    role.parse::<Role>()
        .map_err(|_ignored| StatusError::bad_request().brief("Unknown role"))
}

/// Purchase and selling rights of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EligibilityResponse {
    /// The account the rights belong to
    pub uuid: Uuid,

    /// `customer`, `seller` or `admin`
    pub role: String,

    pub can_purchase: bool,

    pub can_sell: bool,

    /// Human-readable summary of the rights
    pub description: String,
}

impl From<Eligibility> for EligibilityResponse {
    fn from(eligibility: Eligibility) -> Self {
        Self {
            uuid: eligibility.account.into(),
            role: eligibility.role.to_string(),
            can_purchase: eligibility.can_purchase,
            can_sell: eligibility.can_sell,
            description: eligibility.description.to_string(),
        }
    }
}
