//! Accounts Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::{
        accounts::records::{AccountRecord, AccountUuid, Role},
        inventory::records::VariantUuid,
        products::records::ProductUuid,
    },
    store::StoreError,
};

/// Account persistence, including the cart and favourite sets an account owns.
///
/// Set mutations are add-if-absent / remove-if-present and report whether the
/// set changed.
#[automock]
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    async fn create_account(&self, account: AccountRecord) -> Result<AccountRecord, StoreError>;

    async fn get_account(&self, account: AccountUuid) -> Result<AccountRecord, StoreError>;

    async fn set_role(&self, account: AccountUuid, role: Role)
    -> Result<AccountRecord, StoreError>;

    async fn set_customer_mode(
        &self,
        account: AccountUuid,
        enabled: bool,
    ) -> Result<AccountRecord, StoreError>;

    async fn insert_cart_item(
        &self,
        account: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, StoreError>;

    async fn remove_cart_item(
        &self,
        account: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, StoreError>;

    /// Empty the cart, returning how many entries were removed.
    async fn clear_cart(&self, account: AccountUuid) -> Result<usize, StoreError>;

    /// Empty the cart in one step, returning the removed variants in a stable
    /// order.
    async fn take_cart(&self, account: AccountUuid) -> Result<Vec<VariantUuid>, StoreError>;

    async fn insert_favorite(
        &self,
        account: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, StoreError>;

    async fn remove_favorite(
        &self,
        account: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, StoreError>;

    /// Number of carts currently holding the variant.
    async fn carts_referencing(&self, variant: VariantUuid) -> Result<usize, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryAccountsRepository {
    accounts: RwLock<FxHashMap<AccountUuid, AccountRecord>>,
}

impl MemoryAccountsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<T>(
        &self,
        account: AccountUuid,
        apply: impl FnOnce(&mut AccountRecord) -> T + Send,
    ) -> Result<T, StoreError> {
        let mut accounts = self.accounts.write().await;

        let record = accounts.get_mut(&account).ok_or(StoreError::NotFound)?;

        let result = apply(record);

        record.updated_at = Timestamp::now();

        Ok(result)
    }
}

#[async_trait]
impl AccountsRepository for MemoryAccountsRepository {
    async fn create_account(&self, account: AccountRecord) -> Result<AccountRecord, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        accounts.insert(account.uuid, account.clone());

        Ok(account)
    }

    async fn get_account(&self, account: AccountUuid) -> Result<AccountRecord, StoreError> {
        self.accounts
            .read()
            .await
            .get(&account)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn set_role(
        &self,
        account: AccountUuid,
        role: Role,
    ) -> Result<AccountRecord, StoreError> {
        self.update(account, |record| {
            record.role = role;

            if role != Role::Seller {
                record.customer_mode_enabled = false;
            }

            record.clone()
        })
        .await
    }

    async fn set_customer_mode(
        &self,
        account: AccountUuid,
        enabled: bool,
    ) -> Result<AccountRecord, StoreError> {
        self.update(account, |record| {
            record.customer_mode_enabled = enabled;
            record.clone()
        })
        .await
    }

    async fn insert_cart_item(
        &self,
        account: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, StoreError> {
        self.update(account, |record| record.cart.insert(variant))
            .await
    }

    async fn remove_cart_item(
        &self,
        account: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, StoreError> {
        self.update(account, |record| record.cart.remove(&variant))
            .await
    }

    async fn clear_cart(&self, account: AccountUuid) -> Result<usize, StoreError> {
        self.update(account, |record| record.cart.drain().count())
            .await
    }

    async fn take_cart(&self, account: AccountUuid) -> Result<Vec<VariantUuid>, StoreError> {
        self.update(account, |record| {
            let items = record.cart_items();

            record.cart.clear();

            items
        })
        .await
    }

    async fn insert_favorite(
        &self,
        account: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, StoreError> {
        self.update(account, |record| record.favorites.insert(product))
            .await
    }

    async fn remove_favorite(
        &self,
        account: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, StoreError> {
        self.update(account, |record| record.favorites.remove(&product))
            .await
    }

    async fn carts_referencing(&self, variant: VariantUuid) -> Result<usize, StoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .filter(|record| record.cart.contains(&variant))
            .count())
    }
}
