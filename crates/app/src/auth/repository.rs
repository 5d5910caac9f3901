//! Sessions repository.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{auth::models::SessionRecord, store::StoreError};

#[automock]
#[async_trait]
pub trait SessionsRepository: Send + Sync {
    async fn create_session(&self, session: SessionRecord) -> Result<(), StoreError>;

    /// Find a session that has not been revoked.
    async fn find_active_session(&self, uuid: Uuid) -> Result<Option<SessionRecord>, StoreError>;

    /// Revoke a session. Returns `true` if it was active.
    async fn revoke_session(&self, uuid: Uuid, at: Timestamp) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionsRepository {
    sessions: RwLock<FxHashMap<Uuid, SessionRecord>>,
}

impl MemorySessionsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionsRepository for MemorySessionsRepository {
    async fn create_session(&self, session: SessionRecord) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&session.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        sessions.insert(session.uuid, session);

        Ok(())
    }

    async fn find_active_session(&self, uuid: Uuid) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&uuid)
            .filter(|session| session.revoked_at.is_none())
            .cloned())
    }

    async fn revoke_session(&self, uuid: Uuid, at: Timestamp) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get_mut(&uuid) else {
            return Ok(false);
        };

        if session.revoked_at.is_some() {
            return Ok(false);
        }

        session.revoked_at = Some(at);

        Ok(true)
    }
}
