//! Accounts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    domain::accounts::{
        data::NewAccount,
        errors::AccountsServiceError,
        models::Eligibility,
        records::{AccountRecord, AccountUuid, Role},
    },
    store::Store,
};

#[derive(Debug, Clone)]
pub struct StoreAccountsService {
    store: Store,
}

impl StoreAccountsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountsService for StoreAccountsService {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let record = AccountRecord::new(account.uuid, account.role, Timestamp::now());

        let created = self.store.accounts.create_account(record).await?;

        info!(account = %created.uuid, role = %created.role, "created account");

        Ok(created)
    }

    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError> {
        if account.role == Role::Admin {
            return Err(AccountsServiceError::Forbidden);
        }

        self.create_account(account).await
    }

    async fn get_account(&self, account: AccountUuid) -> Result<AccountRecord, AccountsServiceError> {
        Ok(self.store.accounts.get_account(account).await?)
    }

    async fn resolve(&self, account: AccountUuid) -> Result<Eligibility, AccountsServiceError> {
        let record = self.store.accounts.get_account(account).await?;

        Ok(Eligibility::for_account(&record))
    }

    async fn set_role(
        &self,
        requester: AccountUuid,
        account: AccountUuid,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let requester = self.store.accounts.get_account(requester).await?;

        if requester.role != Role::Admin {
            return Err(AccountsServiceError::Forbidden);
        }

        let updated = self.store.accounts.set_role(account, role).await?;

        info!(account = %updated.uuid, role = %updated.role, by = %requester.uuid, "changed account role");

        Ok(updated)
    }

    async fn set_customer_mode(
        &self,
        account: AccountUuid,
        enabled: bool,
    ) -> Result<Eligibility, AccountsServiceError> {
        let record = self.store.accounts.get_account(account).await?;

        if record.role != Role::Seller {
            return Err(AccountsServiceError::NotASeller);
        }

        let updated = self
            .store
            .accounts
            .set_customer_mode(account, enabled)
            .await?;

        Ok(Eligibility::for_account(&updated))
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Provision an account with any role. Used for seeding and admin setup.
    async fn create_account(&self, account: NewAccount)
    -> Result<AccountRecord, AccountsServiceError>;

    /// Self-service sign-up. Only customer and seller accounts may be created.
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError>;

    async fn get_account(&self, account: AccountUuid) -> Result<AccountRecord, AccountsServiceError>;

    /// Resolve what the account may currently do.
    async fn resolve(&self, account: AccountUuid) -> Result<Eligibility, AccountsServiceError>;

    /// Change an account's role. The requester must be an admin.
    async fn set_role(
        &self,
        requester: AccountUuid,
        account: AccountUuid,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Toggle customer mode for a seller.
    async fn set_customer_mode(
        &self,
        account: AccountUuid,
        enabled: bool,
    ) -> Result<Eligibility, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn register_rejects_admin_role() {
        let ctx = TestContext::new();

        let result = ctx
            .accounts
            .register(NewAccount {
                uuid: AccountUuid::new(),
                role: Role::Admin,
            })
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn resolve_unknown_account_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.accounts.resolve(AccountUuid::new()).await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn seller_customer_mode_toggles_purchase_rights() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;

        assert!(!ctx.accounts.resolve(seller).await?.can_purchase);

        let enabled = ctx.accounts.set_customer_mode(seller, true).await?;

        assert!(enabled.can_purchase);
        assert!(enabled.can_sell);

        let disabled = ctx.accounts.set_customer_mode(seller, false).await?;

        assert!(!disabled.can_purchase);

        Ok(())
    }

    #[tokio::test]
    async fn customer_mode_is_refused_for_customers() -> TestResult {
        let ctx = TestContext::new();
        let customer = ctx.create_customer().await?;

        let result = ctx.accounts.set_customer_mode(customer, true).await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotASeller)),
            "expected NotASeller, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_role_requires_admin_requester() -> TestResult {
        let ctx = TestContext::new();
        let customer = ctx.create_customer().await?;
        let other = ctx.create_customer().await?;

        let result = ctx.accounts.set_role(customer, other, Role::Seller).await;

        assert!(
            matches!(result, Err(AccountsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let admin = ctx.create_admin().await?;

        let updated = ctx.accounts.set_role(admin, other, Role::Seller).await?;

        assert_eq!(updated.role, Role::Seller);

        Ok(())
    }
}
