//! Payment Callback Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use marketplace_app::payments::PaymentNotification;

use crate::{extensions::*, observability::observe_payment_callback, state::State};

/// Callback Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CallbackResponse {
    /// What the notification did: `applied`, `unchanged`, `captured`,
    /// `rejected`, `dropped` or `ignored`
    pub outcome: String,
}

/// Payment Callback Handler
///
/// Gateway webhook. Always answers 200 so that the gateway stops
/// redelivering: notifications that cannot be acted on are dropped.
#[endpoint(
    tags("payments"),
    summary = "Payment Gateway Callback",
    responses(
        (status_code = StatusCode::OK, description = "Notification accepted"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CallbackResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let notification = match req.parse_json::<PaymentNotification>().await {
        Ok(notification) => notification,
        Err(error) => {
            warn!("unreadable payment notification: {error}");

            PaymentNotification::default()
        }
    };

    let outcome = state.app.payments.handle_callback(notification).await;

    observe_payment_callback(outcome.as_str());

    Ok(Json(CallbackResponse {
        outcome: outcome.as_str().to_string(),
    }))
}
