//! Orders Repository

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::{
        accounts::records::AccountUuid,
        inventory::records::VariantUuid,
        orders::records::{OrderRecord, OrderStatus, OrderUuid},
    },
    store::StoreError,
};

/// Order persistence with optimistic concurrency.
///
/// `save_order` and `delete_order` only succeed when the caller's `version`
/// matches the stored one. A successful save returns the record with the
/// version bumped.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn create_order(&self, order: OrderRecord) -> Result<OrderRecord, StoreError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, StoreError>;

    async fn list_customer_orders(
        &self,
        customer: AccountUuid,
    ) -> Result<Vec<OrderRecord>, StoreError>;

    async fn save_order(&self, order: OrderRecord) -> Result<OrderRecord, StoreError>;

    async fn delete_order(&self, order: OrderUuid, version: u64) -> Result<(), StoreError>;

    /// Number of pending orders with an item for the variant.
    async fn pending_orders_referencing(&self, variant: VariantUuid) -> Result<usize, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryOrdersRepository {
    orders: RwLock<FxHashMap<OrderUuid, OrderRecord>>,
}

impl MemoryOrdersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersRepository for MemoryOrdersRepository {
    async fn create_order(&self, order: OrderRecord) -> Result<OrderRecord, StoreError> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        orders.insert(order.uuid, order.clone());

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.orders.read().await.get(&order).cloned())
    }

    async fn list_customer_orders(
        &self,
        customer: AccountUuid,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let mut orders: Vec<OrderRecord> = self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.customer == customer)
            .cloned()
            .collect();

        orders.sort_by_key(|order| (order.created_at, order.uuid));

        Ok(orders)
    }

    async fn save_order(&self, mut order: OrderRecord) -> Result<OrderRecord, StoreError> {
        let mut orders = self.orders.write().await;

        let stored = orders.get_mut(&order.uuid).ok_or(StoreError::NotFound)?;

        if stored.version != order.version {
            return Err(StoreError::VersionConflict);
        }

        order.version += 1;
        *stored = order.clone();

        Ok(order)
    }

    async fn delete_order(&self, order: OrderUuid, version: u64) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;

        let stored = orders.get(&order).ok_or(StoreError::NotFound)?;

        if stored.version != version {
            return Err(StoreError::VersionConflict);
        }

        orders.remove(&order);

        Ok(())
    }

    async fn pending_orders_referencing(&self, variant: VariantUuid) -> Result<usize, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.status == OrderStatus::Pending && order.references(variant))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn stale_save_is_rejected() -> TestResult {
        let repository = MemoryOrdersRepository::new();
        let order = repository
            .create_order(OrderRecord::new(
                OrderUuid::new(),
                AccountUuid::new(),
                Timestamp::now(),
            ))
            .await?;

        let saved = repository.save_order(order.clone()).await?;

        assert_eq!(saved.version, 1);

        let result = repository.save_order(order).await;

        assert!(
            matches!(result, Err(StoreError::VersionConflict)),
            "expected VersionConflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stale_delete_is_rejected() -> TestResult {
        let repository = MemoryOrdersRepository::new();
        let order = repository
            .create_order(OrderRecord::new(
                OrderUuid::new(),
                AccountUuid::new(),
                Timestamp::now(),
            ))
            .await?;

        repository.save_order(order.clone()).await?;

        assert!(matches!(
            repository.delete_order(order.uuid, 0).await,
            Err(StoreError::VersionConflict)
        ));

        repository.delete_order(order.uuid, 1).await?;

        assert!(repository.get_order(order.uuid).await?.is_none());

        Ok(())
    }
}
