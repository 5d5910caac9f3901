//! Account Eligibility Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    accounts::{errors::into_status_error, models::EligibilityResponse},
    extensions::*,
    state::State,
};

/// Account Eligibility Handler
///
/// Reports whether the account may purchase and sell right now.
#[endpoint(
    tags("accounts"),
    summary = "Get Account Eligibility",
    responses(
        (status_code = StatusCode::OK, description = "Eligibility resolved"),
        (status_code = StatusCode::NOT_FOUND, description = "Account not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    account: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<EligibilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let eligibility = state
        .app
        .accounts
        .resolve(account.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(eligibility.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::accounts::{
        AccountsServiceError,
        models::Eligibility,
        records::{AccountUuid, Role},
    };

    use crate::test_helpers::{Mocks, anonymous_service, make_account};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(
            mocks,
            Router::with_path("accounts/{account}/eligibility").get(handler),
        )
    }

    #[tokio::test]
    async fn test_seller_without_customer_mode_cannot_purchase() -> TestResult {
        let uuid = AccountUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_resolve()
            .once()
            .withf(move |account| *account == uuid)
            .return_once(|account| {
                Ok(Eligibility::for_account(&make_account(account, Role::Seller)))
            });

        let mut res = TestClient::get(format!("http://example.com/accounts/{uuid}/eligibility"))
            .send(&make_service(mocks))
            .await;

        let body: EligibilityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.role, "seller");
        assert!(!body.can_purchase);
        assert!(body.can_sell);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_account_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_resolve()
            .once()
            .return_once(|_| Err(AccountsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/accounts/{}/eligibility",
            AccountUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
