//! Subject authorization.

use marketplace_app::domain::accounts::{
    AccountsServiceError,
    records::{AccountUuid, Role},
};
use salvo::prelude::{Depot, StatusError};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

/// Check that the session may act for `subject`, returning the session
/// account. Accounts may act for themselves; admins may act for anyone.
pub(crate) async fn authorize_subject(
    state: &State,
    depot: &Depot,
    subject: AccountUuid,
) -> Result<AccountUuid, StatusError> {
    let session = depot.session_account_or_401()?;

    if session == subject {
        return Ok(session);
    }

    match state.app.accounts.get_account(session).await {
        Ok(account) if account.role == Role::Admin => Ok(session),
        Ok(_) => {
            warn!(%session, %subject, "session tried to act for another account");

            Err(StatusError::forbidden().brief("Session does not match the requested account"))
        }
        Err(AccountsServiceError::NotFound) => Err(StatusError::unauthorized()),
        Err(source) => {
            error!("failed to resolve session account: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}
