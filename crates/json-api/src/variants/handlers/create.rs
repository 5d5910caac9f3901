//! Create Variant Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::inventory::{data::NewVariant, records::VariantUuid};

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, models::VariantResponse},
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[salvo(schema(value_type = String))]
    pub price: Decimal,
    /// Initial units in stock
    pub count: u32,
}

impl From<CreateVariantRequest> for NewVariant {
    fn from(request: CreateVariantRequest) -> Self {
        NewVariant {
            uuid: VariantUuid::new(),
            name: request.name,
            description: request.description,
            price: request.price,
            count: request.count,
        }
    }
}

/// Create Variant Handler
#[endpoint(
    tags("variants"),
    summary = "Create Variant",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid price or payload"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Variant name already used"),
    ),
)]
#[tracing::instrument(
    name = "variants.create",
    skip(product, json, depot, res),
    fields(
        product_uuid = tracing::field::Empty,
        variant_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));

    let variant = state
        .app
        .inventory
        .create_variant(requester, product.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("variant_uuid", tracing::field::display(variant.uuid));

    res.add_header(LOCATION, format!("/api/variants/{}", variant.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(variant.into()))
}
