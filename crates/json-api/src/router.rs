//! API Router

use salvo::Router;

use crate::{accounts, auth, carts, favorites, orders, payments, products, variants};

/// Every `/api` route. Sessions are resolved up front; each handler decides
/// whether it needs one.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("accounts")
                .post(accounts::create::handler)
                .push(
                    Router::with_path("{account}")
                        .push(Router::with_path("eligibility").get(accounts::eligibility::handler))
                        .push(Router::with_path("role").put(accounts::role::handler))
                        .push(
                            Router::with_path("customer-mode")
                                .put(accounts::customer_mode::handler),
                        ),
                ),
        )
        .push(Router::with_path("session").delete(accounts::logout::handler))
        .push(
            Router::with_path("cart")
                .delete(carts::clear::handler)
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("remove").post(carts::remove::handler))
                .push(Router::with_path("items").get(carts::items::handler))
                .push(Router::with_path("info").get(carts::info::handler)),
        )
        .push(
            Router::with_path("favorites")
                .push(Router::with_path("add").post(favorites::add::handler))
                .push(Router::with_path("remove").post(favorites::remove::handler))
                .push(Router::with_path("items").get(favorites::items::handler))
                .push(Router::with_path("contains").get(favorites::contains::handler)),
        )
        .push(
            Router::with_path("order")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("checkout").post(orders::checkout::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("add-variant").post(orders::add_variant::handler)),
                ),
        )
        .push(
            Router::with_path("payment")
                .push(Router::with_path("create").post(payments::create::handler))
                .push(Router::with_path("callback").post(payments::callback::handler))
                .push(
                    Router::with_path("{payment_id}")
                        .get(payments::status::handler)
                        .push(Router::with_path("refund").post(payments::refund::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .delete(products::delete::handler)
                        .push(
                            Router::with_path("variants")
                                .post(variants::create::handler)
                                .push(
                                    Router::with_path("exists")
                                        .get(variants::name_exists::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("variants/{variant}")
                .get(variants::get::handler)
                .delete(variants::delete::handler)
                .push(Router::with_path("price").put(variants::price::handler))
                .push(Router::with_path("stock").post(variants::stock::handler)),
        )
}
