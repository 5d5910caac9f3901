//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use marketplace_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, AccountUuid, Role},
        },
        carts::MockCartsService,
        favorites::MockFavoritesService,
        inventory::MockInventoryService,
        orders::MockOrdersService,
        products::MockProductsService,
    },
    payments::MockPaymentsService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid =
    AccountUuid::from_uuid(Uuid::from_u128(0x0190_d4a4_6c3f_7a8e_9a43_1d6f_2b7c_8e90));

pub(crate) const TEST_SESSION_COOKIE: &str = "test_session";

/// One mock per application service. Any call without a matching
/// expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) accounts: MockAccountsService,
    pub(crate) auth: MockAuthService,
    pub(crate) products: MockProductsService,
    pub(crate) inventory: MockInventoryService,
    pub(crate) carts: MockCartsService,
    pub(crate) favorites: MockFavoritesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) payments: MockPaymentsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            accounts: Arc::new(self.accounts),
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            inventory: Arc::new(self.inventory),
            carts: Arc::new(self.carts),
            favorites: Arc::new(self.favorites),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
        };

        State::shared(app, TEST_SESSION_COOKIE.to_string())
    }
}

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session_account(TEST_ACCOUNT_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Serve `route` with the test account signed in.
pub(crate) fn session_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_session)
            .push(route),
    )
}

/// Serve `route` without a session.
pub(crate) fn anonymous_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}

pub(crate) fn make_account(uuid: AccountUuid, role: Role) -> AccountRecord {
    AccountRecord::new(uuid, role, Timestamp::UNIX_EPOCH)
}

/// Expect the session account to be looked up once and resolve to `role`.
pub(crate) fn expect_session_role(accounts: &mut MockAccountsService, role: Role) {
    accounts
        .expect_get_account()
        .once()
        .withf(|account| *account == TEST_ACCOUNT_UUID)
        .return_once(move |account| Ok(make_account(account, role)));
}
