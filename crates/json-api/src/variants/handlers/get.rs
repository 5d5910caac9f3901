//! Get Variant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, models::VariantResponse},
};

/// Get Variant Handler
#[endpoint(
    tags("variants"),
    summary = "Get Variant",
    responses(
        (status_code = StatusCode::OK, description = "Variant found"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let variant = state
        .app
        .inventory
        .get_variant(variant.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(variant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        inventory::{InventoryServiceError, records::VariantUuid},
        products::records::ProductUuid,
    };

    use crate::{
        test_helpers::{Mocks, anonymous_service},
        variants::models::tests::make_variant,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(mocks, Router::with_path("variants/{variant}").get(handler))
    }

    #[tokio::test]
    async fn test_get_variant() -> TestResult {
        let uuid = VariantUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .inventory
            .expect_get_variant()
            .once()
            .withf(move |v| *v == uuid)
            .return_once(move |_| Ok(make_variant(uuid, ProductUuid::new(), 3)));

        let mut res = TestClient::get(format!("http://example.com/variants/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: VariantResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.count, 3);
        assert_eq!(body.previous_price, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_variant_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .inventory
            .expect_get_variant()
            .once()
            .return_once(|_| Err(InventoryServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/variants/{}", VariantUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
