//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    domain::{
        accounts::{models::Eligibility, records::AccountUuid},
        products::{
            data::NewProduct,
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
        },
    },
    store::Store,
};

#[derive(Debug, Clone)]
pub struct StoreProductsService {
    store: Store,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn create_product(
        &self,
        seller: AccountUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let account = self.store.accounts.get_account(seller).await?;

        if !Eligibility::for_account(&account).can_sell {
            return Err(ProductsServiceError::Forbidden);
        }

        let name = product.name.trim();
        let category = product.category.trim();

        if name.is_empty() || category.is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        let now = Timestamp::now();

        let created = self
            .store
            .products
            .create_product(ProductRecord {
                uuid: product.uuid,
                seller,
                category: category.to_string(),
                name: name.to_string(),
                image: product.image.filter(|image| !image.trim().is_empty()),
                rating: Decimal::ZERO,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(product = %created.uuid, %seller, "created product");

        Ok(created)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        Ok(self.store.products.get_product(product).await?)
    }

    async fn delete_product(
        &self,
        requester: AccountUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let record = self.store.products.get_product(product).await?;

        if record.seller != requester {
            return Err(ProductsServiceError::Forbidden);
        }

        let variants = self.store.variants.list_product_variants(product).await?;

        for variant in &variants {
            if self.store.variant_in_use(variant.uuid).await? {
                return Err(ProductsServiceError::Referenced);
            }
        }

        for variant in &variants {
            self.store.variants.delete_variant(variant.uuid).await?;
        }

        if !self.store.products.delete_product(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!(%product, variants = variants.len(), "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Create a product owned by the given seller.
    async fn create_product(
        &self,
        seller: AccountUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a product and its variants. Only the owning seller may do this,
    /// and only while none of its variants sit in a cart or an open order.
    async fn delete_product(
        &self,
        requester: AccountUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::carts::CartsService, test::TestContext};

    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            category: "Shoes".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn create_product_records_owner() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;

        let product = ctx
            .products
            .create_product(seller, new_product("Runner"))
            .await?;

        assert_eq!(product.seller, seller);
        assert_eq!(product.rating, Decimal::ZERO);

        let fetched = ctx.products.get_product(product.uuid).await?;

        assert_eq!(fetched.name, "Runner");

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_create_products() -> TestResult {
        let ctx = TestContext::new();
        let customer = ctx.create_customer().await?;

        let result = ctx
            .products
            .create_product(customer, new_product("Runner"))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_invalid() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;

        let result = ctx.products.create_product(seller, new_product("  ")).await;

        assert!(matches!(result, Err(ProductsServiceError::InvalidData)));

        Ok(())
    }

    #[tokio::test]
    async fn only_owner_can_delete_product() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let other = ctx.create_seller().await?;
        let product = ctx.create_product(seller).await?;

        let result = ctx.products.delete_product(other, product).await;

        assert!(matches!(result, Err(ProductsServiceError::Forbidden)));

        ctx.products.delete_product(seller, product).await?;

        let result = ctx.products.get_product(product).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_is_blocked_while_variant_is_in_a_cart() -> TestResult {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let customer = ctx.create_customer().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, "10.00", 5).await?;

        ctx.carts.add_item(customer, product, variant).await?;

        let result = ctx.products.delete_product(seller, product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::Referenced)),
            "expected Referenced, got {result:?}"
        );

        Ok(())
    }
}
