//! Inventory service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    domain::{
        accounts::records::AccountUuid,
        inventory::{
            data::NewVariant,
            errors::InventoryServiceError,
            models::VariantDetails,
            records::{PricePoint, VariantRecord, VariantUuid},
        },
        products::records::{ProductRecord, ProductUuid},
    },
    store::{Store, StoreError},
};

#[derive(Debug, Clone)]
pub struct StoreInventoryService {
    store: Store,
}

impl StoreInventoryService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Load a variant together with its product, failing unless `requester`
    /// owns the product.
    async fn owned_variant(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
    ) -> Result<(VariantRecord, ProductRecord), InventoryServiceError> {
        let record = self.store.variants.get_variant(variant).await?;
        let product = self.store.products.get_product(record.product).await?;

        if product.seller != requester {
            return Err(InventoryServiceError::Forbidden);
        }

        Ok((record, product))
    }
}

#[async_trait]
impl InventoryService for StoreInventoryService {
    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, InventoryServiceError> {
        Ok(self.store.variants.get_variant(variant).await?)
    }

    async fn get_variants(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<VariantDetails>, InventoryServiceError> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.store.variants.get_variants(variants).await?;
        let mut details = Vec::with_capacity(records.len());

        for record in records {
            match self.store.products.get_product(record.product).await {
                Ok(product) => details.push(VariantDetails::new(record, &product)),
                Err(StoreError::NotFound) => {}
                Err(error) => return Err(error.into()),
            }
        }

        Ok(details)
    }

    async fn variant_name_exists(
        &self,
        product: ProductUuid,
        name: String,
    ) -> Result<bool, InventoryServiceError> {
        Ok(self
            .store
            .variants
            .name_exists_for_product(product, name)
            .await?)
    }

    async fn create_variant(
        &self,
        requester: AccountUuid,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, InventoryServiceError> {
        let owner = self.store.products.get_product(product).await?;

        if owner.seller != requester {
            return Err(InventoryServiceError::Forbidden);
        }

        if variant.price <= Decimal::ZERO {
            return Err(InventoryServiceError::InvalidPrice);
        }

        let name = variant.name.trim();

        if name.is_empty() {
            return Err(InventoryServiceError::InvalidData);
        }

        let now = Timestamp::now();

        let created = self
            .store
            .variants
            .create_variant(VariantRecord {
                uuid: variant.uuid,
                product,
                name: name.to_string(),
                description: variant.description,
                price: variant.price,
                count: variant.count,
                price_history: vec![PricePoint {
                    price: variant.price,
                    set_at: now,
                }],
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(variant = %created.uuid, %product, "created variant");

        Ok(created)
    }

    async fn set_price(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
        price: Decimal,
    ) -> Result<VariantRecord, InventoryServiceError> {
        if price <= Decimal::ZERO {
            return Err(InventoryServiceError::InvalidPrice);
        }

        let (current, _) = self.owned_variant(requester, variant).await?;

        let updated = self
            .store
            .variants
            .set_price(variant, price, Timestamp::now())
            .await?;

        info!(%variant, from = %current.price, to = %updated.price, "changed variant price");

        Ok(updated)
    }

    async fn update_stock(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<VariantRecord, InventoryServiceError> {
        self.owned_variant(requester, variant).await?;

        Ok(self.store.variants.adjust_stock(variant, delta).await?)
    }

    async fn delete_variant(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
    ) -> Result<(), InventoryServiceError> {
        self.owned_variant(requester, variant).await?;

        if self.store.variant_in_use(variant).await? {
            return Err(InventoryServiceError::Referenced);
        }

        if !self.store.variants.delete_variant(variant).await? {
            return Err(InventoryServiceError::NotFound);
        }

        info!(%variant, "deleted variant");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, InventoryServiceError>;

    /// Resolve variants for display. Ids that no longer resolve are dropped.
    async fn get_variants(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<VariantDetails>, InventoryServiceError>;

    /// Case-insensitive check for an existing variant name on a product.
    async fn variant_name_exists(
        &self,
        product: ProductUuid,
        name: String,
    ) -> Result<bool, InventoryServiceError>;

    async fn create_variant(
        &self,
        requester: AccountUuid,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, InventoryServiceError>;

    /// Change the unit price. Orders already holding the variant keep their
    /// snapshot.
    async fn set_price(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
        price: Decimal,
    ) -> Result<VariantRecord, InventoryServiceError>;

    /// Apply a signed stock delta. The count never goes below zero.
    async fn update_stock(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<VariantRecord, InventoryServiceError>;

    /// Delete a variant unless a cart or a pending order still references it.
    async fn delete_variant(
        &self,
        requester: AccountUuid,
        variant: VariantUuid,
    ) -> Result<(), InventoryServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            orders::{OrdersService, data::NewOrder, data::NewOrderItem},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_variant_rejects_non_positive_price() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;

        let result = ctx
            .inventory
            .create_variant(
                seller,
                product,
                NewVariant {
                    uuid: VariantUuid::new(),
                    name: "Red".to_string(),
                    description: String::new(),
                    price: Decimal::ZERO,
                    count: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(InventoryServiceError::InvalidPrice)));

        Ok(())
    }

    #[tokio::test]
    async fn create_variant_rejects_duplicate_name() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;

        ctx.create_variant_named(seller, product, "Large", "5.00", 1)
            .await?;

        assert!(
            ctx.inventory
                .variant_name_exists(product, "LARGE".to_string())
                .await?
        );

        let result = ctx
            .create_variant_named(seller, product, "large", "5.00", 1)
            .await;

        assert!(result.is_err(), "duplicate name should be refused");

        Ok(())
    }

    #[tokio::test]
    async fn only_owner_may_change_price() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let other = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 1).await?;

        let result = ctx
            .inventory
            .set_price(other, variant, Decimal::new(500, 2))
            .await;

        assert!(matches!(result, Err(InventoryServiceError::Forbidden)));

        let updated = ctx
            .inventory
            .set_price(seller, variant, Decimal::new(500, 2))
            .await?;

        assert_eq!(updated.price, Decimal::new(500, 2));
        assert_eq!(updated.price_history.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_stock_decrements_keep_count_non_negative() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 7).await?;

        let inventory: Arc<dyn InventoryService> = Arc::new(ctx.inventory.clone());

        let handles: Vec<_> = [3_i64, 2, 4, 1, 5, 2]
            .into_iter()
            .map(|amount| {
                let inventory = Arc::clone(&inventory);

                tokio::spawn(
                    async move { inventory.update_stock(seller, variant, -amount).await },
                )
            })
            .collect();

        let mut decremented = 0_u32;

        for handle in handles {
            match handle.await? {
                Ok(_) => decremented += 1,
                Err(InventoryServiceError::InsufficientStock { .. }) => {}
                Err(error) => return Err(error.into()),
            }
        }

        let remaining = ctx.inventory.get_variant(variant).await?.count;

        assert!(decremented > 0);
        assert!(remaining <= 7);

        Ok(())
    }

    #[tokio::test]
    async fn get_variants_joins_product_details() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 3).await?;

        let details = ctx
            .inventory
            .get_variants(vec![variant, VariantUuid::new()])
            .await?;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].product, product);
        assert_eq!(details[0].seller, seller);
        assert_eq!(details[0].count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn delete_variant_blocked_by_pending_order() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let customer = ctx.create_customer().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 3).await?;

        let order = ctx
            .orders
            .create_order(customer, NewOrder::default())
            .await?;

        ctx.orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product,
                    variant,
                    quantity: 1,
                },
            )
            .await?;

        let result = ctx.inventory.delete_variant(seller, variant).await;

        assert!(
            matches!(result, Err(InventoryServiceError::Referenced)),
            "expected Referenced, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreferenced_variant_can_be_deleted() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let customer = ctx.create_customer().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 3).await?;

        ctx.carts.add_item(customer, product, variant).await?;
        ctx.carts.remove_item(customer, variant).await?;

        ctx.inventory.delete_variant(seller, variant).await?;

        let result = ctx.inventory.get_variant(variant).await;

        assert!(matches!(result, Err(InventoryServiceError::NotFound)));

        Ok(())
    }
}
