//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, StoreAuthService},
    domain::{
        accounts::{AccountsService, StoreAccountsService},
        carts::{CartsService, StoreCartsService},
        favorites::{FavoritesService, StoreFavoritesService},
        inventory::{InventoryService, StoreInventoryService},
        orders::{OrdersService, StoreOrdersService},
        products::{ProductsService, StoreProductsService},
    },
    payments::{
        GatewayPaymentsService, HttpPaymentGateway, PaymentGateway, PaymentGatewayConfig,
        PaymentGatewayError, PaymentsService,
    },
    store::Store,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build payment gateway client")]
    PaymentGateway(#[source] PaymentGatewayError),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub inventory: Arc<dyn InventoryService>,
    pub carts: Arc<dyn CartsService>,
    pub favorites: Arc<dyn FavoritesService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Wire every service to the given store and payment gateway.
    #[must_use]
    pub fn new(store: Store, gateway: Arc<dyn PaymentGateway>, verify_callbacks: bool) -> Self {
        let orders: Arc<dyn OrdersService> = Arc::new(StoreOrdersService::new(store.clone()));

        Self {
            accounts: Arc::new(StoreAccountsService::new(store.clone())),
            auth: Arc::new(StoreAuthService::new(store.clone())),
            products: Arc::new(StoreProductsService::new(store.clone())),
            inventory: Arc::new(StoreInventoryService::new(store.clone())),
            carts: Arc::new(StoreCartsService::new(store.clone())),
            favorites: Arc::new(StoreFavoritesService::new(store)),
            payments: Arc::new(GatewayPaymentsService::new(
                Arc::clone(&orders),
                gateway,
                verify_callbacks,
            )),
            orders,
        }
    }

    /// Build application context over an in-memory store and the HTTP
    /// payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway client cannot be built.
    pub fn in_memory(
        gateway: PaymentGatewayConfig,
        verify_callbacks: bool,
    ) -> Result<Self, AppInitError> {
        let gateway = HttpPaymentGateway::new(gateway).map_err(AppInitError::PaymentGateway)?;

        Ok(Self::new(
            Store::in_memory(),
            Arc::new(gateway),
            verify_callbacks,
        ))
    }
}
