//! Variants Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::{
        inventory::records::{PricePoint, VariantRecord, VariantUuid},
        products::records::ProductUuid,
    },
    store::StoreError,
};

#[automock]
#[async_trait]
pub trait VariantsRepository: Send + Sync {
    /// Insert a variant. Fails with `AlreadyExists` when the uuid is taken or
    /// the product already has a variant with the same name, ignoring case.
    async fn create_variant(&self, variant: VariantRecord) -> Result<VariantRecord, StoreError>;

    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError>;

    /// Fetch several variants. Unknown ids are omitted.
    async fn get_variants(&self, variants: Vec<VariantUuid>) -> Result<Vec<VariantRecord>, StoreError>;

    async fn list_product_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<VariantRecord>, StoreError>;

    /// Apply `count += delta` if the result stays within `0..=u32::MAX`.
    async fn adjust_stock(&self, variant: VariantUuid, delta: i64)
    -> Result<VariantRecord, StoreError>;

    /// Set a new price and append it to the history in one step.
    async fn set_price(
        &self,
        variant: VariantUuid,
        price: Decimal,
        at: Timestamp,
    ) -> Result<VariantRecord, StoreError>;

    async fn name_exists_for_product(
        &self,
        product: ProductUuid,
        name: String,
    ) -> Result<bool, StoreError>;

    /// Delete a variant. Returns `false` when it did not exist.
    async fn delete_variant(&self, variant: VariantUuid) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryVariantsRepository {
    variants: RwLock<FxHashMap<VariantUuid, VariantRecord>>,
}

impl MemoryVariantsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken<'a>(
    mut variants: impl Iterator<Item = &'a VariantRecord>,
    product: ProductUuid,
    name: &str,
) -> bool {
    let name = name.trim().to_lowercase();

    variants.any(|variant| {
        variant.product == product && variant.name.trim().to_lowercase() == name
    })
}

#[async_trait]
impl VariantsRepository for MemoryVariantsRepository {
    async fn create_variant(&self, variant: VariantRecord) -> Result<VariantRecord, StoreError> {
        let mut variants = self.variants.write().await;

        if variants.contains_key(&variant.uuid)
            || name_taken(variants.values(), variant.product, &variant.name)
        {
            return Err(StoreError::AlreadyExists);
        }

        variants.insert(variant.uuid, variant.clone());

        Ok(variant)
    }

    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError> {
        self.variants
            .read()
            .await
            .get(&variant)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_variants(&self, variants: Vec<VariantUuid>) -> Result<Vec<VariantRecord>, StoreError> {
        let stored = self.variants.read().await;

        Ok(variants
            .iter()
            .filter_map(|variant| stored.get(variant).cloned())
            .collect())
    }

    async fn list_product_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<VariantRecord>, StoreError> {
        let mut variants: Vec<VariantRecord> = self
            .variants
            .read()
            .await
            .values()
            .filter(|variant| variant.product == product)
            .cloned()
            .collect();

        variants.sort_by_key(|variant| variant.uuid);

        Ok(variants)
    }

    async fn adjust_stock(
        &self,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<VariantRecord, StoreError> {
        let mut variants = self.variants.write().await;

        let record = variants.get_mut(&variant).ok_or(StoreError::NotFound)?;

        let adjusted = i64::from(record.count)
            .checked_add(delta)
            .ok_or(StoreError::OutOfRange)?;

        if adjusted < 0 {
            return Err(StoreError::InsufficientStock {
                available: record.count,
                requested: delta.unsigned_abs(),
            });
        }

        record.count = u32::try_from(adjusted).map_err(|_| StoreError::OutOfRange)?;
        record.updated_at = Timestamp::now();

        Ok(record.clone())
    }

    async fn set_price(
        &self,
        variant: VariantUuid,
        price: Decimal,
        at: Timestamp,
    ) -> Result<VariantRecord, StoreError> {
        let mut variants = self.variants.write().await;

        let record = variants.get_mut(&variant).ok_or(StoreError::NotFound)?;

        record.price = price;
        record.price_history.push(PricePoint { price, set_at: at });
        record.updated_at = at;

        Ok(record.clone())
    }

    async fn name_exists_for_product(
        &self,
        product: ProductUuid,
        name: String,
    ) -> Result<bool, StoreError> {
        Ok(name_taken(self.variants.read().await.values(), product, &name))
    }

    async fn delete_variant(&self, variant: VariantUuid) -> Result<bool, StoreError> {
        Ok(self.variants.write().await.remove(&variant).is_some())
    }
}
