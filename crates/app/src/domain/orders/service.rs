//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::{
    domain::{
        accounts::{models::Eligibility, records::AccountUuid},
        inventory::records::VariantUuid,
        orders::{
            data::{NewOrder, NewOrderItem, OrderUpdate},
            errors::OrdersServiceError,
            models::StatusChange,
            records::{
                OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, Transition,
            },
        },
    },
    store::{Store, StoreError},
};

/// Attempts made at a versioned write before giving up with `Conflict`.
const MAX_SAVE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct StoreOrdersService {
    store: Store,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn purchasable_account(&self, customer: AccountUuid) -> Result<(), OrdersServiceError> {
        let account = self.store.accounts.get_account(customer).await?;

        match Eligibility::for_account(&account).purchase_denial() {
            Some(denial) => Err(OrdersServiceError::Forbidden(denial)),
            None => Ok(()),
        }
    }

    async fn load_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        self.store
            .orders
            .get_order(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }

    /// Reserve stock for a variant, returning the new item priced at the
    /// variant's current price.
    async fn reserve_item(&self, item: NewOrderItem) -> Result<OrderItemRecord, OrdersServiceError> {
        if item.quantity == 0 {
            return Err(OrdersServiceError::InvalidArgument(
                "quantity must be greater than zero",
            ));
        }

        let variant = self.store.variants.get_variant(item.variant).await?;

        if variant.product != item.product {
            return Err(OrdersServiceError::InvalidReference);
        }

        let reserved = self
            .store
            .variants
            .adjust_stock(item.variant, -i64::from(item.quantity))
            .await?;

        Ok(OrderItemRecord {
            uuid: OrderItemUuid::new(),
            product: item.product,
            variant: item.variant,
            quantity: item.quantity,
            unit_price: reserved.price,
            status: OrderStatus::Pending,
        })
    }

    /// Return reserved units to stock. Failures are logged; there is nothing
    /// left to roll back to.
    async fn release_stock(&self, order: OrderUuid, items: &[OrderItemRecord]) {
        for item in items {
            if let Err(source) = self
                .store
                .variants
                .adjust_stock(item.variant, i64::from(item.quantity))
                .await
            {
                error!(
                    %order,
                    variant = %item.variant,
                    quantity = item.quantity,
                    error = %source,
                    "failed to release reserved stock"
                );
            }
        }
    }

    /// Append an already reserved item to a pending order.
    async fn append_item(
        &self,
        order: OrderUuid,
        item: &OrderItemRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let mut record = self.load_order(order).await?;

            if record.status != OrderStatus::Pending {
                return Err(OrdersServiceError::InvalidState {
                    status: record.status,
                });
            }

            record.items.push(item.clone());
            record.recalculate();
            record.updated_at = Timestamp::now();

            match self.store.orders.save_order(record).await {
                Ok(saved) => return Ok(saved),
                Err(StoreError::VersionConflict) => {}
                Err(source) => return Err(source.into()),
            }
        }

        Err(OrdersServiceError::Conflict)
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(
        &self,
        customer: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.purchasable_account(customer).await?;

        let mut record = OrderRecord::new(OrderUuid::new(), customer, Timestamp::now());

        record.shipping_address = order.shipping_address;
        record.billing_address = order.billing_address;
        record.payment_method = order.payment_method;

        let created = self.store.orders.create_order(record).await?;

        info!(order = %created.uuid, %customer, "created order");

        Ok(created)
    }

    async fn add_item(
        &self,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let current = self.load_order(order).await?;

        if current.status != OrderStatus::Pending {
            return Err(OrdersServiceError::InvalidState {
                status: current.status,
            });
        }

        let reserved = self.reserve_item(item).await?;

        match self.append_item(order, &reserved).await {
            Ok(saved) => Ok(saved),
            Err(error) => {
                warn!(%order, variant = %item.variant, %error, "rolling back stock reservation");

                self.release_stock(order, std::slice::from_ref(&reserved))
                    .await;

                Err(error)
            }
        }
    }

    async fn checkout(&self, customer: AccountUuid) -> Result<OrderRecord, OrdersServiceError> {
        self.purchasable_account(customer).await?;

        // A concurrent checkout of the same cart finds it empty.
        let cart = self.store.accounts.take_cart(customer).await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let created = match self
            .store
            .orders
            .create_order(OrderRecord::new(OrderUuid::new(), customer, Timestamp::now()))
            .await
        {
            Ok(created) => created,
            Err(source) => {
                self.restore_cart(customer, &cart).await;

                return Err(source.into());
            }
        };

        let mut reserved: Vec<OrderItemRecord> = Vec::with_capacity(cart.len());

        for variant in &cart {
            let product = match self.store.variants.get_variant(*variant).await {
                Ok(record) => record.product,
                Err(source) => {
                    self.abandon_checkout(&created, &reserved, &cart).await;

                    return Err(source.into());
                }
            };

            let item = NewOrderItem {
                product,
                variant: *variant,
                quantity: 1,
            };

            match self.reserve_item(item).await {
                Ok(record) => reserved.push(record),
                Err(error) => {
                    self.abandon_checkout(&created, &reserved, &cart).await;

                    return Err(error);
                }
            }
        }

        let mut order = created.clone();

        order.items.clone_from(&reserved);
        order.recalculate();
        order.updated_at = Timestamp::now();

        let saved = match self.store.orders.save_order(order).await {
            Ok(saved) => saved,
            Err(source) => {
                self.abandon_checkout(&created, &reserved, &cart).await;

                return Err(source.into());
            }
        };

        info!(
            order = %saved.uuid,
            %customer,
            items = saved.items.len(),
            total = %saved.total,
            "checked out cart"
        );

        Ok(saved)
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        requester: AccountUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if update.discount.is_some_and(|discount| discount < Decimal::ZERO) {
            return Err(OrdersServiceError::InvalidArgument(
                "discount must not be negative",
            ));
        }

        for _ in 0..MAX_SAVE_ATTEMPTS {
            let mut record = self.load_order(order).await?;

            if record.customer != requester {
                return Err(OrdersServiceError::Unauthorized);
            }

            if record.status != OrderStatus::Pending {
                return Err(OrdersServiceError::InvalidState {
                    status: record.status,
                });
            }

            if let Some(discount) = update.discount {
                record.discount = discount;
            }

            if let Some(address) = &update.shipping_address {
                record.shipping_address = Some(address.clone());
            }

            if let Some(address) = &update.billing_address {
                record.billing_address = Some(address.clone());
            }

            if let Some(method) = &update.payment_method {
                record.payment_method = Some(method.clone());
            }

            record.recalculate();
            record.updated_at = Timestamp::now();

            match self.store.orders.save_order(record).await {
                Ok(saved) => return Ok(saved),
                Err(StoreError::VersionConflict) => {}
                Err(source) => return Err(source.into()),
            }
        }

        Err(OrdersServiceError::Conflict)
    }

    async fn delete_order(
        &self,
        order: OrderUuid,
        requester: AccountUuid,
    ) -> Result<(), OrdersServiceError> {
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let record = self.load_order(order).await?;

            if record.customer != requester {
                return Err(OrdersServiceError::Unauthorized);
            }

            if record.status == OrderStatus::Confirmed {
                return Err(OrdersServiceError::InvalidState {
                    status: record.status,
                });
            }

            match self.store.orders.delete_order(order, record.version).await {
                Ok(()) => {
                    if record.status == OrderStatus::Pending {
                        self.release_stock(order, &record.items).await;
                    }

                    info!(%order, status = %record.status, "deleted order");

                    return Ok(());
                }
                Err(StoreError::VersionConflict) => {}
                Err(source) => return Err(source.into()),
            }
        }

        Err(OrdersServiceError::Conflict)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, OrdersServiceError> {
        Ok(self.store.orders.get_order(order).await?)
    }

    async fn list_customer_orders(
        &self,
        customer: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self.store.orders.list_customer_orders(customer).await?)
    }

    async fn transition(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError> {
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let mut record = self.load_order(order).await?;
            let from = record.status;

            match from.transition_to(status) {
                Ok(Transition::Unchanged) => return Ok(StatusChange::Unchanged(record)),
                Ok(Transition::Apply) => {}
                Err(invalid) => {
                    return Err(OrdersServiceError::InvalidTransition {
                        from: invalid.from,
                        to: invalid.to,
                    });
                }
            }

            record.set_status(status);
            record.updated_at = Timestamp::now();

            match self.store.orders.save_order(record).await {
                Ok(saved) => {
                    if status == OrderStatus::Cancelled {
                        self.release_stock(order, &saved.items).await;
                    }

                    info!(%order, %from, to = %status, "order status changed");

                    return Ok(StatusChange::Applied(saved));
                }
                Err(StoreError::VersionConflict) => {}
                Err(source) => return Err(source.into()),
            }
        }

        Err(OrdersServiceError::Conflict)
    }
}

impl StoreOrdersService {
    /// Undo a partially built checkout order and hand the cart back.
    async fn abandon_checkout(
        &self,
        order: &OrderRecord,
        reserved: &[OrderItemRecord],
        cart: &[VariantUuid],
    ) {
        self.release_stock(order.uuid, reserved).await;

        if let Err(source) = self.store.orders.delete_order(order.uuid, order.version).await {
            error!(order = %order.uuid, error = %source, "failed to remove abandoned checkout order");
        }

        self.restore_cart(order.customer, cart).await;
    }

    async fn restore_cart(&self, customer: AccountUuid, cart: &[VariantUuid]) {
        for variant in cart {
            if let Err(source) = self.store.accounts.insert_cart_item(customer, *variant).await {
                error!(%customer, %variant, error = %source, "failed to restore cart item");
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Open an empty pending order for the customer.
    async fn create_order(
        &self,
        customer: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Reserve stock for a variant and append it to a pending order at the
    /// variant's current price.
    async fn add_item(
        &self,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Turn the customer's whole cart into a new order, one unit per variant.
    async fn checkout(&self, customer: AccountUuid) -> Result<OrderRecord, OrdersServiceError>;

    async fn update_order(
        &self,
        order: OrderUuid,
        requester: AccountUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn delete_order(
        &self,
        order: OrderUuid,
        requester: AccountUuid,
    ) -> Result<(), OrdersServiceError>;

    /// Retrieve an order, or `None` when it does not exist.
    async fn get_order(&self, order: OrderUuid) -> Result<Option<OrderRecord>, OrdersServiceError>;

    async fn list_customer_orders(
        &self,
        customer: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to a new status, mirroring it onto every item.
    async fn transition(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{
            accounts::models::PurchaseDenial, carts::CartsService,
            inventory::{InventoryService, records::VariantUuid},
            products::records::ProductUuid,
        },
        test::TestContext,
    };

    use super::*;

    struct Fixture {
        ctx: TestContext,
        seller: AccountUuid,
        customer: AccountUuid,
        product: ProductUuid,
        variant: VariantUuid,
    }

    async fn fixture(price: &str, count: u32) -> TestResult<Fixture> {
        let ctx = TestContext::new();
        let seller = ctx.create_seller().await?;
        let customer = ctx.create_customer().await?;
        let product = ctx.create_product(seller).await?;
        let variant = ctx.create_variant(seller, product, price, count).await?;

        Ok(Fixture {
            ctx,
            seller,
            customer,
            product,
            variant,
        })
    }

    #[tokio::test]
    async fn add_item_snapshots_price_and_reserves_stock() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        let updated = f
            .ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(updated.total, Decimal::new(2000, 2));
        assert_eq!(updated.final_price, Decimal::new(2000, 2));
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 3);

        f.ctx
            .inventory
            .set_price(f.seller, f.variant, Decimal::new(9900, 2))
            .await?;

        let reloaded = f.ctx.orders.get_order(order.uuid).await?.ok_or("order missing")?;

        assert_eq!(
            reloaded.items.first().map(|item| item.unit_price),
            Some(Decimal::new(1000, 2))
        );
        assert_eq!(reloaded.total, Decimal::new(2000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_order_and_stock_untouched() -> TestResult {
        let f = fixture("10.00", 1).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        let result = f
            .ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 2,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock {
                    available: 1,
                    requested: 2
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let reloaded = f.ctx.orders.get_order(order.uuid).await?.ok_or("order missing")?;

        assert!(reloaded.items.is_empty());
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_zero_quantity_and_mismatched_product() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        let zero = f
            .ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 0,
                },
            )
            .await;

        assert!(matches!(zero, Err(OrdersServiceError::InvalidArgument(_))));

        let mismatched = f
            .ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: ProductUuid::new(),
                    variant: f.variant,
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(mismatched, Err(OrdersServiceError::InvalidReference)));
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 5);

        Ok(())
    }

    #[tokio::test]
    async fn racing_orders_never_oversell() -> TestResult {
        let f = fixture("10.00", 3).await?;
        let orders: Arc<dyn OrdersService> = Arc::new(f.ctx.orders.clone());

        let mut handles = Vec::new();

        for _ in 0..8 {
            let order = orders.create_order(f.customer, NewOrder::default()).await?;
            let orders = Arc::clone(&orders);
            let item = NewOrderItem {
                product: f.product,
                variant: f.variant,
                quantity: 1,
            };

            handles.push(tokio::spawn(async move {
                orders.add_item(order.uuid, item).await
            }));
        }

        let mut placed = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => placed += 1,
                Err(OrdersServiceError::InsufficientStock { .. }) => {}
                Err(error) => return Err(error.into()),
            }
        }

        assert_eq!(placed, 3);
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_moves_cart_into_order() -> TestResult {
        let f = fixture("4.50", 2).await?;
        let second = f
            .ctx
            .create_variant_named(f.seller, f.product, "Blue", "5.50", 1)
            .await?;

        f.ctx.carts.add_item(f.customer, f.product, f.variant).await?;
        f.ctx.carts.add_item(f.customer, f.product, second).await?;

        let order = f.ctx.orders.checkout(f.customer).await?;

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, Decimal::new(1000, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(f.ctx.carts.list_items(f.customer).await?.is_empty());
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 1);
        assert_eq!(f.ctx.inventory.get_variant(second).await?.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_releases_every_reservation() -> TestResult {
        let f = fixture("4.50", 2).await?;
        let sold_out = f
            .ctx
            .create_variant_named(f.seller, f.product, "Blue", "5.50", 0)
            .await?;

        f.ctx.carts.add_item(f.customer, f.product, f.variant).await?;
        f.ctx.carts.add_item(f.customer, f.product, sold_out).await?;

        let result = f.ctx.orders.checkout(f.customer).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );

        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 2);
        assert!(f.ctx.orders.list_customer_orders(f.customer).await?.is_empty());
        assert_eq!(f.ctx.carts.list_items(f.customer).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_build_a_single_order() -> TestResult {
        let f = fixture("4.50", 10).await?;
        let orders: Arc<dyn OrdersService> = Arc::new(f.ctx.orders.clone());

        f.ctx.carts.add_item(f.customer, f.product, f.variant).await?;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let orders = Arc::clone(&orders);
                let customer = f.customer;

                tokio::spawn(async move { orders.checkout(customer).await })
            })
            .collect();

        let mut placed = 0;

        for handle in handles {
            match handle.await? {
                Ok(_) => placed += 1,
                Err(OrdersServiceError::EmptyCart) => {}
                Err(error) => return Err(error.into()),
            }
        }

        assert_eq!(placed, 1);
        assert_eq!(f.ctx.orders.list_customer_orders(f.customer).await?.len(), 1);
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 9);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_rejected() -> TestResult {
        let f = fixture("4.50", 2).await?;

        let result = f.ctx.orders.checkout(f.customer).await;

        assert!(matches!(result, Err(OrdersServiceError::EmptyCart)));

        Ok(())
    }

    #[tokio::test]
    async fn sellers_cannot_open_orders_without_customer_mode() -> TestResult {
        let f = fixture("4.50", 2).await?;

        let result = f.ctx.orders.create_order(f.seller, NewOrder::default()).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::Forbidden(
                PurchaseDenial::SellerModeDisabled
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn update_is_owner_only_and_keeps_total_derived() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        f.ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 3,
                },
            )
            .await?;

        let stranger = f.ctx.create_customer().await?;

        let result = f
            .ctx
            .orders
            .update_order(order.uuid, stranger, OrderUpdate::default())
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Unauthorized)));

        let updated = f
            .ctx
            .orders
            .update_order(
                order.uuid,
                f.customer,
                OrderUpdate {
                    discount: Some(Decimal::new(500, 2)),
                    shipping_address: Some("Lenina 1".to_string()),
                    ..OrderUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.total, Decimal::new(3000, 2));
        assert_eq!(updated.final_price, Decimal::new(2500, 2));
        assert_eq!(updated.shipping_address.as_deref(), Some("Lenina 1"));

        let negative = f
            .ctx
            .orders
            .update_order(
                order.uuid,
                f.customer,
                OrderUpdate {
                    discount: Some(Decimal::NEGATIVE_ONE),
                    ..OrderUpdate::default()
                },
            )
            .await;

        assert!(matches!(negative, Err(OrdersServiceError::InvalidArgument(_))));

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_orders_cannot_be_deleted() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        f.ctx
            .orders
            .transition(order.uuid, OrderStatus::Confirmed)
            .await?;

        let result = f.ctx.orders.delete_order(order.uuid, f.customer).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidState {
                status: OrderStatus::Confirmed
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_pending_order_releases_stock() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        f.ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 4,
                },
            )
            .await?;

        let stranger = f.ctx.create_customer().await?;

        assert!(matches!(
            f.ctx.orders.delete_order(order.uuid, stranger).await,
            Err(OrdersServiceError::Unauthorized)
        ));

        f.ctx.orders.delete_order(order.uuid, f.customer).await?;

        assert!(f.ctx.orders.get_order(order.uuid).await?.is_none());
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 5);

        Ok(())
    }

    #[tokio::test]
    async fn terminal_status_is_never_overwritten() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        let first = f
            .ctx
            .orders
            .transition(order.uuid, OrderStatus::Confirmed)
            .await?;

        assert!(matches!(first, StatusChange::Applied(_)));

        let again = f
            .ctx
            .orders
            .transition(order.uuid, OrderStatus::Confirmed)
            .await?;

        assert!(matches!(again, StatusChange::Unchanged(_)));

        let result = f
            .ctx
            .orders
            .transition(order.uuid, OrderStatus::Cancelled)
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Cancelled
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cancelling_releases_stock_and_mirrors_items() -> TestResult {
        let f = fixture("10.00", 5).await?;
        let order = f.ctx.orders.create_order(f.customer, NewOrder::default()).await?;

        f.ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 2,
                },
            )
            .await?;

        let change = f
            .ctx
            .orders
            .transition(order.uuid, OrderStatus::Cancelled)
            .await?;

        assert!(
            change
                .order()
                .items
                .iter()
                .all(|item| item.status == OrderStatus::Cancelled)
        );
        assert_eq!(f.ctx.inventory.get_variant(f.variant).await?.count, 5);

        let result = f
            .ctx
            .orders
            .add_item(
                order.uuid,
                NewOrderItem {
                    product: f.product,
                    variant: f.variant,
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidState {
                status: OrderStatus::Cancelled
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_order_is_none() -> TestResult {
        let ctx = TestContext::new();

        assert!(ctx.orders.get_order(OrderUuid::new()).await?.is_none());

        Ok(())
    }
}
