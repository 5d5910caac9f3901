//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
///
/// Removes the product and its variants.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another seller"),
        (status_code = StatusCode::CONFLICT, description = "Variants still referenced"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.session_account_or_401()?;
    let product = product.into_inner();

    state
        .app
        .products
        .delete_product(requester, product.into())
        .await
        .map_err(into_status_error)?;

    info!(%product, %requester, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use marketplace_app::domain::products::ProductsServiceError;

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID, session_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        session_service(mocks, Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .withf(move |requester, p| *requester == TEST_ACCOUNT_UUID && p.into_uuid() == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_referenced_product_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Referenced));

        let res = TestClient::delete(format!("http://example.com/products/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::delete("http://example.com/products/123")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
