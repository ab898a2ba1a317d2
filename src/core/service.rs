//! Service traits for the two side effects of placing an order

use crate::core::order::Order;
use crate::notify::NotifyError;
use async_trait::async_trait;

/// Append-only sink for order lines
///
/// Implementations write one line per call and never read it back. There is
/// no locking contract: concurrent appends may land in any order, but each
/// line must arrive whole.
#[async_trait]
pub trait OrderLog: Send + Sync {
    /// Append a single line; the implementation adds the line terminator
    async fn append(&self, line: &str) -> std::io::Result<()>;

    /// Short description for log output (a path, "memory", ...)
    fn describe(&self) -> String;
}

/// Sends a notification about a saved order
///
/// Callers treat every error as non-fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, order: &Order) -> Result<(), NotifyError>;
}
