//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::{SessionSecret, SessionTokenVersion},
    domain::accounts::records::AccountUuid,
};

/// Session data persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: Uuid,
    pub account: AccountUuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
    pub created_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub uuid: Uuid,
    pub account: AccountUuid,
    pub created_at: Timestamp,
}
