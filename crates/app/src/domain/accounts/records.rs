//! Account Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    domain::{inventory::records::VariantUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Account role.
///
/// The set is closed: role names coming from the outside are matched against
/// [`Role::ALL`] and anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Customer, Self::Seller, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role \"{0}\"")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownRoleError(value.to_string()))
    }
}

/// Account Record
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub role: Role,
    /// Whether a seller has opted in to purchasing.
    pub customer_mode_enabled: bool,
    pub cart: FxHashSet<VariantUuid>,
    pub favorites: FxHashSet<ProductUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccountRecord {
    #[must_use]
    pub fn new(uuid: AccountUuid, role: Role, now: Timestamp) -> Self {
        Self {
            uuid,
            role,
            customer_mode_enabled: false,
            cart: FxHashSet::default(),
            favorites: FxHashSet::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Cart contents in a stable order.
    #[must_use]
    pub fn cart_items(&self) -> Vec<VariantUuid> {
        let mut items: Vec<VariantUuid> = self.cart.iter().copied().collect();

        items.sort_unstable();

        items
    }

    /// Favourites in a stable order.
    #[must_use]
    pub fn favorite_items(&self) -> Vec<ProductUuid> {
        let mut items: Vec<ProductUuid> = self.favorites.iter().copied().collect();

        items.sort_unstable();

        items
    }
}
