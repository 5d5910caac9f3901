//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionRecord, SessionTokenVersion, format_session_token,
        generate_session_secret, parse_session_token,
    },
    domain::accounts::records::AccountUuid,
    store::Store,
};

#[derive(Debug, Clone)]
pub struct StoreAuthService {
    store: Store,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn issue_session(&self, account: AccountUuid) -> Result<IssuedSession, AuthServiceError> {
        // The account must exist before it can hold a session.
        self.store.accounts.get_account(account).await?;

        let uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(uuid, version, &secret);
        let created_at = Timestamp::now();

        self.store
            .sessions
            .create_session(SessionRecord {
                uuid,
                account,
                version,
                secret,
                created_at,
                revoked_at: None,
            })
            .await?;

        debug!(session = %uuid, %account, "issued session");

        Ok(IssuedSession {
            token,
            uuid,
            account,
            created_at,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<AccountUuid, AuthServiceError> {
        let parsed = parse_session_token(token).map_err(|_| AuthServiceError::NotFound)?;

        let session = self
            .store
            .sessions
            .find_active_session(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.version != parsed.version || !session.secret.matches(&parsed.secret) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(session.account)
    }

    async fn revoke_session(&self, token: &str) -> Result<bool, AuthServiceError> {
        let parsed = parse_session_token(token)?;

        Ok(self
            .store
            .sessions
            .revoke_session(parsed.token_uuid, Timestamp::now())
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a new session for the account, returning the raw token once.
    async fn issue_session(&self, account: AccountUuid) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a raw session token to the account it belongs to.
    async fn authenticate(&self, token: &str) -> Result<AccountUuid, AuthServiceError>;

    /// Revoke the session behind a raw token. Returns `true` if it was active.
    async fn revoke_session(&self, token: &str) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_session_authenticates_to_its_account() -> TestResult {
        let ctx = TestContext::new();
        let account = ctx.create_customer().await?;

        let issued = ctx.auth.issue_session(account).await?;

        assert_eq!(ctx.auth.authenticate(&issued.token).await?, account);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new();
        let account = ctx.create_customer().await?;

        let issued = ctx.auth.issue_session(account).await?;

        let (id, _) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_session_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new();
        let account = ctx.create_customer().await?;

        let issued = ctx.auth.issue_session(account).await?;

        assert!(ctx.auth.revoke_session(&issued.token).await?);
        assert!(!ctx.auth.revoke_session(&issued.token).await?);

        let result = ctx.auth.authenticate(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn issue_session_for_unknown_account_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.auth.issue_session(AccountUuid::new()).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn garbage_token_is_not_found() {
        let ctx = TestContext::new();

        let result = ctx.auth.authenticate("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }
}
