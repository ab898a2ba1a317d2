//! # Fish Parque
//!
//! Order intake service for a single merchant. A static web form collects the
//! customer's details and product choice; the backend validates the
//! submission against per-product minimum quantities, appends one line per
//! order to a flat log and, when SMTP credentials are configured, emails the
//! merchant.
//!
//! ## Endpoints
//!
//! - `GET /` - the order form
//! - `GET /api/health` - liveness check
//! - `GET /api/products` - product catalogue with minimum quantities
//! - `POST /api/order` - place an order; always HTTP 200 with
//!   `{ "success": bool, "message": string }`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fish_parque::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(AppConfig::from_env()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod notify;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        GENERIC_FAILURE_MESSAGE, Notifier, Order, OrderDetails, OrderError, OrderIntake,
        OrderLog, OrderRequest, OrderResponse, Product, ProductInfo, catalogue,
    };

    // === Config ===
    pub use crate::config::{AppConfig, ConfigError, NotificationConfig, SmtpConfig};

    // === Notifications ===
    pub use crate::notify::{Notifications, NotifyError, SmtpNotifier};

    // === Storage ===
    pub use crate::storage::{FileOrderLog, InMemoryOrderLog};

    // === Server ===
    pub use crate::server::{AppState, HealthResponse, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
