//! Best-effort order notifications
//!
//! Once an order is in the log the customer gets a success response no matter
//! what happens here. [`Notifications::deliver`] runs the notifier on its own
//! task, waits a bounded time for it, logs the outcome and returns nothing. A
//! notifier that panics only ends its own task.

pub mod smtp;

pub use smtp::SmtpNotifier;

use crate::config::NotificationConfig;
use crate::core::{Notifier, Order};
use std::sync::Arc;
use std::time::Duration;

/// Errors from sending a notification
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, ...)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The sender or recipient address could not be parsed
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("email build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// The HTML body could not be rendered
    #[error("email template error: {0}")]
    Template(#[from] tera::Error),

    /// The send did not finish in time
    #[error("notification timed out after {0:?}")]
    Timeout(Duration),

    /// The notifier task panicked or was cancelled
    #[error("notification task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How (and whether) saved orders are announced
#[derive(Clone)]
pub enum Notifications {
    Disabled,
    Enabled {
        notifier: Arc<dyn Notifier>,
        timeout: Duration,
    },
}

impl Notifications {
    pub fn enabled(notifier: impl Notifier + 'static, timeout: Duration) -> Self {
        Notifications::Enabled {
            notifier: Arc::new(notifier),
            timeout,
        }
    }

    /// Build the notifier described by the configuration
    pub fn from_config(config: &NotificationConfig) -> Result<Self, NotifyError> {
        match config {
            NotificationConfig::Disabled => Ok(Notifications::Disabled),
            NotificationConfig::Smtp(smtp) => Ok(Notifications::enabled(
                SmtpNotifier::new(smtp.clone())?,
                smtp.send_timeout(),
            )),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Notifications::Enabled { .. })
    }

    /// Announce a saved order, logging and discarding any failure
    ///
    /// The notifier task is aborted when the timeout wins.
    pub async fn deliver(&self, order: &Order) {
        let Notifications::Enabled { notifier, timeout } = self else {
            tracing::info!(
                order_number = %order.number,
                "Notifications not configured, order saved to log only"
            );
            return;
        };

        let mut task = {
            let notifier = Arc::clone(notifier);
            let order = order.clone();
            tokio::spawn(async move { notifier.notify(&order).await })
        };

        let outcome = match tokio::time::timeout(*timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(NotifyError::Task(join_error)),
            Err(_) => {
                task.abort();
                Err(NotifyError::Timeout(*timeout))
            }
        };

        match outcome {
            Ok(()) => {
                tracing::info!(order_number = %order.number, "Notification sent");
            }
            Err(error) => {
                tracing::warn!(
                    order_number = %order.number,
                    error = %error,
                    "Notification failed, order is still saved"
                );
            }
        }
    }
}

impl std::fmt::Debug for Notifications {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notifications::Disabled => f.write_str("Disabled"),
            Notifications::Enabled { timeout, .. } => f
                .debug_struct("Enabled")
                .field("timeout", timeout)
                .finish_non_exhaustive(),
        }
    }
}
