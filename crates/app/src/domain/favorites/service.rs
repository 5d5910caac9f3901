//! Favorites service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, warn};

use crate::{
    domain::{
        accounts::{models::Eligibility, records::AccountUuid, records::Role},
        favorites::errors::FavoritesServiceError,
        products::records::ProductUuid,
    },
    store::{Store, StoreError},
};

/// Result of favouriting a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteAddition {
    pub success: bool,
    pub already_present: bool,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct StoreFavoritesService {
    store: Store,
}

impl StoreFavoritesService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoritesService for StoreFavoritesService {
    async fn add_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<FavoriteAddition, FavoritesServiceError> {
        let account = self.store.accounts.get_account(user).await?;
        let eligibility = Eligibility::for_account(&account);

        if let Some(denial) = eligibility.purchase_denial() {
            return Err(FavoritesServiceError::Forbidden(denial));
        }

        self.store.products.get_product(product).await?;

        let (success, already_present) =
            match self.store.accounts.insert_favorite(user, product).await {
                Ok(true) => (true, false),
                Ok(false) => {
                    warn!(%user, %product, "product already in favorites");

                    (true, true)
                }
                Err(StoreError::NotFound) => return Err(FavoritesServiceError::NotFound),
                Err(source) => {
                    error!(%user, %product, error = %source, "failed to persist favorite");

                    (false, false)
                }
            };

        Ok(FavoriteAddition {
            success,
            already_present,
            role: eligibility.role,
        })
    }

    async fn remove_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError> {
        self.store.accounts.get_account(user).await?;

        match self.store.accounts.remove_favorite(user, product).await {
            Ok(removed) => Ok(removed),
            Err(StoreError::NotFound) => Err(FavoritesServiceError::NotFound),
            Err(source) => {
                error!(%user, %product, error = %source, "failed to persist favorite removal");

                Ok(false)
            }
        }
    }

    async fn list_items(&self, user: AccountUuid) -> Result<Vec<ProductUuid>, FavoritesServiceError> {
        if user.is_nil() {
            return Err(FavoritesServiceError::InvalidArgument(
                "userId must not be empty",
            ));
        }

        Ok(self.store.accounts.get_account(user).await?.favorite_items())
    }

    async fn is_favorite(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError> {
        let account = self.store.accounts.get_account(user).await?;

        Ok(account.favorites.contains(&product))
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Favourite a product. Repeats succeed without changing anything.
    async fn add_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<FavoriteAddition, FavoritesServiceError>;

    /// Returns `false` when the product was not a favourite.
    async fn remove_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError>;

    async fn list_items(&self, user: AccountUuid) -> Result<Vec<ProductUuid>, FavoritesServiceError>;

    async fn is_favorite(
        &self,
        user: AccountUuid,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError>;
}
