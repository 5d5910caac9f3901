//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            category: request.category,
            image: request.image,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Account may not sell"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.session_account_or_401()?;

    let product = state
        .app
        .products
        .create_product(seller, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
