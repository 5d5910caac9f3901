//! Favorite Handlers

pub(crate) mod add;
pub(crate) mod contains;
pub(crate) mod items;
pub(crate) mod remove;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body shared by the add and remove endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavoriteRequest {
    pub product_id: Uuid,
}
