//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use marketplace_app::domain::{accounts::records::AccountUuid, carts::models::CartAddition};

use crate::{
    auth::authorize_subject, carts::errors::into_status_error, extensions::*, state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub product_id: Uuid,
    pub variant_id: Uuid,
}

/// Add Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemResponse {
    /// Whether the cart now holds the variant
    pub success: bool,
    pub message: String,
    pub user_role: String,
}

impl From<CartAddition> for AddCartItemResponse {
    fn from(addition: CartAddition) -> Self {
        let message = match (addition.success, addition.already_present) {
            (false, _) => "Не удалось добавить товар в корзину, попробуйте ещё раз",
            (true, true) => "Товар уже в корзине",
            (true, false) => "Товар добавлен в корзину",
        };

        Self {
            success: addition.success,
            message: message.to_string(),
            user_role: addition.role.to_string(),
        }
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Add Variant to Cart",
    security(("session" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Outcome of the addition"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session"),
        (status_code = StatusCode::FORBIDDEN, description = "Account may not purchase"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or variant not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(req, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        variant_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<AddCartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: AccountUuid = req.uuid_query("userId")?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("variant_uuid", tracing::field::display(request.variant_id));

    authorize_subject(state, depot, user).await?;

    let addition = state
        .app
        .carts
        .add_item(user, request.product_id.into(), request.variant_id.into())
        .await
        .map_err(into_status_error)?;

    if !addition.success {
        warn!("cart addition was not persisted");
    }

    Ok(Json(addition.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::{
        accounts::{
            models::PurchaseDenial,
            records::{AccountUuid, Role},
        },
        carts::CartsServiceError,
        inventory::records::VariantUuid,
        products::records::ProductUuid,
    };

    use crate::test_helpers::{
        Mocks, TEST_ACCOUNT_UUID, anonymous_service, expect_session_role, session_service,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/add").post(handler)
    }

    #[tokio::test]
    async fn test_customer_add_succeeds() -> TestResult {
        let product = ProductUuid::new();
        let variant = VariantUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(move |user, p, v| *user == TEST_ACCOUNT_UUID && *p == product && *v == variant)
            .return_once(|_, _, _| {
                Ok(CartAddition {
                    success: true,
                    already_present: false,
                    role: Role::Customer,
                })
            });

        let mut res = TestClient::post(format!(
            "http://example.com/cart/add?userId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "productId": product.into_uuid(), "variantId": variant.into_uuid() }))
        .send(&session_service(mocks, route()))
        .await;

        let body: AddCartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.user_role, "customer");

        Ok(())
    }

    #[tokio::test]
    async fn test_seller_without_customer_mode_gets_403_with_reason() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| {
                Err(CartsServiceError::Forbidden(
                    PurchaseDenial::SellerModeDisabled,
                ))
            });

        let mut res = TestClient::post(format!(
            "http://example.com/cart/add?userId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
        .send(&session_service(mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(
            res.take_string()
                .await?
                .contains(PurchaseDenial::SellerModeDisabled.message())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unpersisted_addition_reports_failure() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| {
                Ok(CartAddition {
                    success: false,
                    already_present: false,
                    role: Role::Customer,
                })
            });

        let mut res = TestClient::post(format!(
            "http://example.com/cart/add?userId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
        .send(&session_service(mocks, route()))
        .await;

        let body: AddCartItemResponse = res.take_json().await?;

        assert!(!body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_cart_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        expect_session_role(&mut mocks.accounts, Role::Customer);

        mocks.carts.expect_add_item().never();

        let res = TestClient::post(format!(
            "http://example.com/cart/add?userId={}",
            AccountUuid::new()
        ))
        .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
        .send(&session_service(mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_may_act_for_another_user() -> TestResult {
        let user = AccountUuid::new();
        let mut mocks = Mocks::default();

        expect_session_role(&mut mocks.accounts, Role::Admin);

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(move |u, _, _| *u == user)
            .return_once(|_, _, _| Err(CartsServiceError::Forbidden(PurchaseDenial::NotCustomer)));

        let res = TestClient::post(format!("http://example.com/cart/add?userId={user}"))
            .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
            .send(&session_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_session_returns_401() -> TestResult {
        let res = TestClient::post(format!(
            "http://example.com/cart/add?userId={TEST_ACCOUNT_UUID}"
        ))
        .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
        .send(&anonymous_service(Mocks::default(), route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_user_id_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "productId": Uuid::now_v7(), "variantId": Uuid::now_v7() }))
            .send(&session_service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
