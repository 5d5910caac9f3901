//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        orders::{
            OrdersService, OrdersServiceError,
            models::StatusChange,
            records::{OrderRecord, OrderStatus},
        },
    },
    payments::{
        CallbackOutcome, DropReason, GatewayPaymentRequest, NewPayment, PaymentGateway,
        PaymentIntent, PaymentNotification, PaymentStatus, PaymentsServiceError,
        models::metadata_uuid,
    },
};

const EVENT_WAITING_FOR_CAPTURE: &str = "payment.waiting_for_capture";
const EVENT_SUCCEEDED: &str = "payment.succeeded";
const EVENT_CANCELED: &str = "payment.canceled";

#[derive(Clone)]
pub struct GatewayPaymentsService {
    orders: Arc<dyn OrdersService>,
    gateway: Arc<dyn PaymentGateway>,
    verify_callbacks: bool,
}

impl std::fmt::Debug for GatewayPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayPaymentsService")
            .field("verify_callbacks", &self.verify_callbacks)
            .finish_non_exhaustive()
    }
}

impl GatewayPaymentsService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersService>,
        gateway: Arc<dyn PaymentGateway>,
        verify_callbacks: bool,
    ) -> Self {
        Self {
            orders,
            gateway,
            verify_callbacks,
        }
    }

    /// Ask the gateway whether the payment really is in `expected` status and
    /// belongs to the order.
    async fn verified(&self, payment_id: &str, order: &OrderRecord, expected: &str) -> Option<DropReason> {
        match self.gateway.get_payment(payment_id.to_string()).await {
            Ok(payment) => {
                let same_order = metadata_uuid(&payment.metadata, "orderId") == Some(order.uuid);

                if payment.status == expected && same_order {
                    None
                } else {
                    warn!(
                        payment = payment_id,
                        order = %order.uuid,
                        reported = %payment.status,
                        expected,
                        "gateway does not confirm notification"
                    );

                    Some(DropReason::Unverified)
                }
            }
            Err(source) => {
                error!(payment = payment_id, error = %source, "failed to verify notification");

                Some(DropReason::GatewayFailure)
            }
        }
    }

    async fn capture(&self, payment_id: &str, order: &OrderRecord) -> CallbackOutcome {
        if order.status != OrderStatus::Pending {
            warn!(payment = payment_id, order = %order.uuid, status = %order.status, "order is no longer capturable");

            return CallbackOutcome::Unchanged(order.status);
        }

        match self
            .gateway
            .capture_payment(payment_id.to_string(), order.final_price)
            .await
        {
            Ok(payment) => {
                info!(payment = payment_id, order = %order.uuid, amount = %order.final_price, status = %payment.status, "captured payment");

                CallbackOutcome::Captured
            }
            Err(source) => {
                error!(payment = payment_id, order = %order.uuid, error = %source, "failed to capture payment");

                CallbackOutcome::Dropped(DropReason::GatewayFailure)
            }
        }
    }

    async fn apply(&self, payment_id: &str, order: &OrderRecord, status: OrderStatus) -> CallbackOutcome {
        match self.orders.transition(order.uuid, status).await {
            Ok(StatusChange::Applied(_)) => CallbackOutcome::Applied(status),
            Ok(StatusChange::Unchanged(_)) => {
                info!(payment = payment_id, order = %order.uuid, %status, "duplicate notification");

                CallbackOutcome::Unchanged(status)
            }
            Err(OrdersServiceError::InvalidTransition { from, to }) => {
                warn!(payment = payment_id, order = %order.uuid, %from, %to, "refusing to move terminal order");

                CallbackOutcome::Rejected { from, to }
            }
            Err(OrdersServiceError::NotFound) => CallbackOutcome::Dropped(DropReason::UnknownOrder),
            Err(source) => {
                error!(payment = payment_id, order = %order.uuid, error = %source, "failed to apply notification");

                CallbackOutcome::Dropped(DropReason::StoreFailure)
            }
        }
    }
}

#[async_trait]
impl PaymentsService for GatewayPaymentsService {
    async fn create_payment(
        &self,
        user: AccountUuid,
        payment: NewPayment,
    ) -> Result<PaymentIntent, PaymentsServiceError> {
        if payment.amount <= Decimal::ZERO {
            return Err(PaymentsServiceError::InvalidAmount);
        }

        if payment.return_url.trim().is_empty() {
            return Err(PaymentsServiceError::InvalidArgument("returnUrl is required"));
        }

        let order = self
            .orders
            .get_order(payment.order)
            .await?
            .ok_or(PaymentsServiceError::OrderNotFound)?;

        if order.customer != user {
            return Err(PaymentsServiceError::Forbidden);
        }

        if order.status != OrderStatus::Pending {
            return Err(PaymentsServiceError::OrderNotPending {
                status: order.status,
            });
        }

        if order.items.is_empty() || order.final_price <= Decimal::ZERO {
            return Err(PaymentsServiceError::EmptyOrder);
        }

        // Capture charges `final_price`.
        if payment.amount != order.final_price {
            return Err(PaymentsServiceError::AmountMismatch {
                expected: order.final_price,
            });
        }

        let description = payment
            .description
            .filter(|description| !description.trim().is_empty())
            .unwrap_or_else(|| format!("Оплата заказа {}", order.uuid));

        let mut metadata = Map::new();

        metadata.insert("orderId".to_string(), Value::String(order.uuid.to_string()));
        metadata.insert("userId".to_string(), Value::String(user.to_string()));

        let created = self
            .gateway
            .create_payment(GatewayPaymentRequest {
                amount: payment.amount,
                description,
                return_url: payment.return_url,
                metadata,
            })
            .await
            .inspect_err(|source| {
                error!(order = %order.uuid, error = %source, "failed to create payment");
            })?;

        info!(order = %order.uuid, payment = %created.id, status = %created.status, "created payment");

        Ok(PaymentIntent {
            status: PaymentStatus::from_gateway(&created.status),
            payment_id: created.id,
            confirmation_url: created.confirmation_url,
        })
    }

    async fn handle_callback(&self, notification: PaymentNotification) -> CallbackOutcome {
        let payment_id = notification.object.id.as_str();

        let Some(order_uuid) = notification.object.order() else {
            warn!(payment = payment_id, event = %notification.event, "notification without a usable orderId");

            return CallbackOutcome::Dropped(DropReason::MissingOrderId);
        };

        let order = match self.orders.get_order(order_uuid).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!(payment = payment_id, order = %order_uuid, "notification for unknown order");

                return CallbackOutcome::Dropped(DropReason::UnknownOrder);
            }
            Err(source) => {
                error!(payment = payment_id, order = %order_uuid, error = %source, "failed to load order for notification");

                return CallbackOutcome::Dropped(DropReason::StoreFailure);
            }
        };

        if let Some(user) = notification.object.user()
            && user != Some(order.customer)
        {
            warn!(payment = payment_id, order = %order.uuid, "notification userId does not own the order");

            return CallbackOutcome::Dropped(DropReason::UserMismatch);
        }

        let (target, expected) = match notification.event.as_str() {
            EVENT_WAITING_FOR_CAPTURE => return self.capture(payment_id, &order).await,
            EVENT_SUCCEEDED => (OrderStatus::Confirmed, "succeeded"),
            EVENT_CANCELED => (OrderStatus::Cancelled, "canceled"),
            other => {
                info!(payment = payment_id, event = other, "ignoring notification");

                return CallbackOutcome::Ignored;
            }
        };

        if self.verify_callbacks
            && let Some(reason) = self.verified(payment_id, &order, expected).await
        {
            return CallbackOutcome::Dropped(reason);
        }

        self.apply(payment_id, &order, target).await
    }

    async fn check_status(&self, payment_id: String) -> Result<PaymentStatus, PaymentsServiceError> {
        let payment = self.gateway.get_payment(payment_id).await?;

        Ok(PaymentStatus::from_gateway(&payment.status))
    }

    async fn refund(&self, payment_id: String, amount: Decimal) -> Result<bool, PaymentsServiceError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentsServiceError::InvalidAmount);
        }

        let refund = self
            .gateway
            .refund(payment_id.clone(), amount)
            .await
            .inspect_err(|source| {
                error!(payment = %payment_id, error = %source, "refund request failed");
            })?;

        let accepted = refund.status != "canceled";

        info!(payment = %payment_id, refund = %refund.id, status = %refund.status, accepted, "requested refund");

        Ok(accepted)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Start a payment for a pending order owned by `user`.
    async fn create_payment(
        &self,
        user: AccountUuid,
        payment: NewPayment,
    ) -> Result<PaymentIntent, PaymentsServiceError>;

    /// Process a gateway notification. Never fails: anything that cannot be
    /// acted on is logged and dropped so the gateway stops redelivering it.
    async fn handle_callback(&self, notification: PaymentNotification) -> CallbackOutcome;

    /// Poll the gateway for a payment's status.
    async fn check_status(&self, payment_id: String) -> Result<PaymentStatus, PaymentsServiceError>;

    /// Ask the gateway for a refund. Returns whether it was accepted; transport
    /// and non-2xx failures are errors. Local order state is not changed.
    async fn refund(&self, payment_id: String, amount: Decimal) -> Result<bool, PaymentsServiceError>;
}
