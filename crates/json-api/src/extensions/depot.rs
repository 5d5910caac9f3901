//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use marketplace_app::domain::accounts::records::AccountUuid;

const SESSION_ACCOUNT_DEPOT_KEY: &str = "session_account";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_account(&mut self, account: AccountUuid);

    fn session_account(&self) -> Option<AccountUuid>;

    fn session_account_or_401(&self) -> Result<AccountUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_account(&mut self, account: AccountUuid) {
        self.insert(SESSION_ACCOUNT_DEPOT_KEY, account);
    }

    fn session_account(&self) -> Option<AccountUuid> {
        self.get::<AccountUuid>(SESSION_ACCOUNT_DEPOT_KEY).ok().copied()
    }

    fn session_account_or_401(&self) -> Result<AccountUuid, StatusError> {
        self.session_account()
            .ok_or_else(|| StatusError::unauthorized().brief("A session is required"))
    }
}
