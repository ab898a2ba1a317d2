//! The order pipeline: validate, persist, notify
//!
//! Each step returns a `Result` and the first failure ends the request, except
//! notification, which can only log.

use crate::core::error::OrderError;
use crate::core::order::Order;
use crate::core::request::OrderRequest;
use crate::core::service::OrderLog;
use crate::notify::Notifications;
use chrono::Local;
use std::sync::Arc;

/// Places orders against an order log and a notification channel
#[derive(Clone)]
pub struct OrderIntake {
    log: Arc<dyn OrderLog>,
    notifications: Notifications,
}

impl OrderIntake {
    pub fn new(log: Arc<dyn OrderLog>, notifications: Notifications) -> Self {
        Self { log, notifications }
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Run the whole pipeline for one submission
    ///
    /// On success the order has been appended to the log. A failed append
    /// returns [`OrderError::Persistence`] and skips notification entirely.
    pub async fn place(&self, request: &OrderRequest) -> Result<Order, OrderError> {
        let details = request.validated()?;
        let order = Order::new(details, Local::now());

        self.persist(&order).await?;
        self.notifications.deliver(&order).await;

        Ok(order)
    }

    async fn persist(&self, order: &Order) -> Result<(), OrderError> {
        if let Err(error) = self.log.append(&order.log_line()).await {
            tracing::error!(
                order_number = %order.number,
                log = %self.log.describe(),
                error = %error,
                "Failed to save order"
            );
            return Err(OrderError::Persistence(error));
        }

        tracing::info!(
            order_number = %order.number,
            log = %self.log.describe(),
            "Order saved"
        );
        Ok(())
    }
}
