//! Variant Name Check Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, variants::errors::into_status_error};

/// Variant Name Check Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantNameExistsResponse {
    pub exists: bool,
}

/// Variant Name Check Handler
///
/// Case-insensitive check for a variant `name` on the product.
#[endpoint(
    tags("variants"),
    summary = "Check Variant Name",
    responses(
        (status_code = StatusCode::OK, description = "Name checked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<VariantNameExistsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let name = req
        .query::<String>("name")
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("missing \"name\""))?;

    let exists = state
        .app
        .inventory
        .variant_name_exists(product.into_inner().into(), name)
        .await
        .map_err(into_status_error)?;

    Ok(Json(VariantNameExistsResponse { exists }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::products::records::ProductUuid;

    use crate::test_helpers::{Mocks, anonymous_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(
            mocks,
            Router::with_path("products/{product}/variants/exists").get(handler),
        )
    }

    #[tokio::test]
    async fn test_name_is_forwarded() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .inventory
            .expect_variant_name_exists()
            .once()
            .withf(move |p, name| *p == product && name == "Blue")
            .return_once(|_, _| Ok(true));

        let mut res = TestClient::get(format!(
            "http://example.com/products/{product}/variants/exists?name=Blue"
        ))
        .send(&make_service(mocks))
        .await;

        let body: VariantNameExistsResponse = res.take_json().await?;

        assert!(body.exists);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_name_returns_400() -> TestResult {
        let res = TestClient::get(format!(
            "http://example.com/products/{}/variants/exists",
            ProductUuid::new()
        ))
        .send(&make_service(Mocks::default()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
