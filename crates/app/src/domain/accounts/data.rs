//! Account Data

use crate::domain::accounts::records::{AccountUuid, Role};

/// New Account Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub role: Role,
}
