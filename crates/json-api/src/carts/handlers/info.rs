//! Cart Line Info Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{carts::models::CartLine, inventory::records::VariantUuid};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Display details for one cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineInfo {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub variant_name: String,
    #[salvo(schema(value_type = String))]
    pub price: Decimal,
    /// Units currently in stock
    pub available: u32,
    pub image: Option<String>,
    pub category: String,
    #[salvo(schema(value_type = String))]
    pub rating: Decimal,
}

impl From<CartLine> for CartLineInfo {
    fn from(line: CartLine) -> Self {
        Self {
            variant_id: line.variant.into(),
            product_id: line.product.into(),
            product_name: line.product_name,
            variant_name: line.variant_name,
            price: line.price,
            available: line.available,
            image: line.image,
            category: line.category,
            rating: line.rating,
        }
    }
}

/// Cart Line Info Handler
///
/// Resolves `variantIds` to display details. Ids that no longer resolve are
/// left out.
#[endpoint(
    tags("carts"),
    summary = "Cart Line Details",
    responses(
        (status_code = StatusCode::OK, description = "Cart line details"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed variant id"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<CartLineInfo>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let variants: Vec<VariantUuid> = req.uuid_list_query("variantIds")?;

    if variants.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let lines = state
        .app
        .carts
        .item_details(variants)
        .await
        .map_err(into_status_error)?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}
