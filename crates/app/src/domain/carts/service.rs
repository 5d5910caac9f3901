//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, warn};

use crate::{
    domain::{
        accounts::{models::Eligibility, records::AccountUuid},
        carts::{
            errors::CartsServiceError,
            models::{CartAddition, CartLine},
        },
        inventory::{InventoryService, InventoryServiceError, StoreInventoryService, records::VariantUuid},
        products::records::ProductUuid,
    },
    store::{Store, StoreError},
};

#[derive(Debug, Clone)]
pub struct StoreCartsService {
    store: Store,
    inventory: StoreInventoryService,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inventory: StoreInventoryService::new(store.clone()),
            store,
        }
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn add_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
        variant: VariantUuid,
    ) -> Result<CartAddition, CartsServiceError> {
        let account = self.store.accounts.get_account(user).await?;
        let eligibility = Eligibility::for_account(&account);

        if let Some(denial) = eligibility.purchase_denial() {
            return Err(CartsServiceError::Forbidden(denial));
        }

        self.store.products.get_product(product).await?;

        let record = self.store.variants.get_variant(variant).await?;

        if record.product != product {
            return Err(CartsServiceError::InvalidReference);
        }

        let (success, already_present) =
            match self.store.accounts.insert_cart_item(user, variant).await {
                Ok(true) => (true, false),
                Ok(false) => {
                    warn!(%user, %variant, "variant already in cart");

                    (true, true)
                }
                Err(StoreError::NotFound) => return Err(CartsServiceError::NotFound),
                Err(source) => {
                    error!(%user, %variant, error = %source, "failed to persist cart item");

                    (false, false)
                }
            };

        Ok(CartAddition {
            success,
            already_present,
            role: eligibility.role,
        })
    }

    async fn remove_item(
        &self,
        user: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, CartsServiceError> {
        self.store.accounts.get_account(user).await?;

        match self.store.accounts.remove_cart_item(user, variant).await {
            Ok(removed) => Ok(removed),
            Err(StoreError::NotFound) => Err(CartsServiceError::NotFound),
            Err(source) => {
                error!(%user, %variant, error = %source, "failed to persist cart removal");

                Ok(false)
            }
        }
    }

    async fn list_items(&self, user: AccountUuid) -> Result<Vec<VariantUuid>, CartsServiceError> {
        if user.is_nil() {
            return Err(CartsServiceError::InvalidArgument("userId must not be empty"));
        }

        let account = self.store.accounts.get_account(user).await?;

        Ok(account.cart_items())
    }

    async fn item_details(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<CartLine>, CartsServiceError> {
        let details = self
            .inventory
            .get_variants(variants)
            .await
            .map_err(|error| match error {
                InventoryServiceError::Store(source) => CartsServiceError::Store(source),
                _ => CartsServiceError::NotFound,
            })?;

        Ok(details.into_iter().map(CartLine::from).collect())
    }

    async fn clear(&self, user: AccountUuid) -> Result<usize, CartsServiceError> {
        Ok(self.store.accounts.clear_cart(user).await?)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a variant to the user's cart. Adding a variant that is already
    /// present succeeds without changing anything.
    async fn add_item(
        &self,
        user: AccountUuid,
        product: ProductUuid,
        variant: VariantUuid,
    ) -> Result<CartAddition, CartsServiceError>;

    /// Remove a variant. Returns `false` when it was not in the cart or the
    /// removal could not be persisted.
    async fn remove_item(
        &self,
        user: AccountUuid,
        variant: VariantUuid,
    ) -> Result<bool, CartsServiceError>;

    async fn list_items(&self, user: AccountUuid) -> Result<Vec<VariantUuid>, CartsServiceError>;

    /// Display details for the given variants. Unknown ids are skipped.
    async fn item_details(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Empty the cart, returning how many variants were removed.
    async fn clear(&self, user: AccountUuid) -> Result<usize, CartsServiceError>;
}
