//! Storage handles shared by the application services.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    auth::{MemorySessionsRepository, SessionsRepository},
    domain::{
        accounts::repository::{AccountsRepository, MemoryAccountsRepository},
        inventory::{
            records::VariantUuid,
            repository::{MemoryVariantsRepository, VariantsRepository},
        },
        orders::repository::{MemoryOrdersRepository, OrdersRepository},
        products::repository::{MemoryProductsRepository, ProductsRepository},
    },
};

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u64 },

    #[error("value out of range")]
    OutOfRange,

    #[error("record was modified concurrently")]
    VersionConflict,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// One repository per entity.
///
/// Every mutation a repository exposes is atomic with respect to the record it
/// touches; services never read-modify-write a whole record without a version
/// check.
#[derive(Clone)]
pub struct Store {
    pub(crate) accounts: Arc<dyn AccountsRepository>,
    pub(crate) sessions: Arc<dyn SessionsRepository>,
    pub(crate) products: Arc<dyn ProductsRepository>,
    pub(crate) variants: Arc<dyn VariantsRepository>,
    pub(crate) orders: Arc<dyn OrdersRepository>,
}

impl Store {
    /// Build a store backed entirely by in-memory tables.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountsRepository::new()),
            sessions: Arc::new(MemorySessionsRepository::new()),
            products: Arc::new(MemoryProductsRepository::new()),
            variants: Arc::new(MemoryVariantsRepository::new()),
            orders: Arc::new(MemoryOrdersRepository::new()),
        }
    }

    /// Whether a variant sits in any cart or any pending order.
    pub(crate) async fn variant_in_use(&self, variant: VariantUuid) -> Result<bool, StoreError> {
        if self.accounts.carts_referencing(variant).await? > 0 {
            return Ok(true);
        }

        Ok(self.orders.pending_orders_referencing(variant).await? > 0)
    }

    #[must_use]
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountsRepository>) -> Self {
        self.accounts = accounts;
        self
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: Arc<dyn SessionsRepository>) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub fn with_products(mut self, products: Arc<dyn ProductsRepository>) -> Self {
        self.products = products;
        self
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Arc<dyn VariantsRepository>) -> Self {
        self.variants = variants;
        self
    }

    #[must_use]
    pub fn with_orders(mut self, orders: Arc<dyn OrdersRepository>) -> Self {
        self.orders = orders;
        self
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
