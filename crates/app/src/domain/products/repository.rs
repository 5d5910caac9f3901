//! Products Repository

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::products::records::{ProductRecord, ProductUuid},
    store::StoreError,
};

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn create_product(&self, product: ProductRecord) -> Result<ProductRecord, StoreError>;

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, StoreError>;

    /// Delete a product. Returns `false` when it did not exist.
    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryProductsRepository {
    products: RwLock<FxHashMap<ProductUuid, ProductRecord>>,
}

impl MemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductsRepository for MemoryProductsRepository {
    async fn create_product(&self, product: ProductRecord) -> Result<ProductRecord, StoreError> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        products.insert(product.uuid, product.clone());

        Ok(product)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, StoreError> {
        self.products
            .read()
            .await
            .get(&product)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(&product).is_some())
    }
}
