//! ServerBuilder for fluent API to build the HTTP server

use super::router::{build_api_routes, build_static_routes};
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::{Notifier, OrderIntake, OrderLog};
use crate::notify::Notifications;
use crate::storage::FileOrderLog;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the order intake server
///
/// Anything not set explicitly comes from the [`AppConfig`]: the order log is
/// a [`FileOrderLog`] at `storage.orders_file` and notifications follow
/// `notifications`.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_env()?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    order_log: Option<Arc<dyn OrderLog>>,
    notifications: Option<Notifications>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            order_log: None,
            notifications: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific order log instead of the configured file
    pub fn with_order_log(mut self, log: impl OrderLog + 'static) -> Self {
        self.order_log = Some(Arc::new(log));
        self
    }

    /// Use a specific notifier, bounded by `timeout`
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static, timeout: Duration) -> Self {
        self.notifications = Some(Notifications::enabled(notifier, timeout));
        self
    }

    /// Turn notifications off regardless of the configuration
    pub fn without_notifications(mut self) -> Self {
        self.notifications = Some(Notifications::Disabled);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the order pipeline from the configured parts
    pub fn build_intake(&mut self) -> Result<OrderIntake> {
        let log = match self.order_log.take() {
            Some(log) => log,
            None => Arc::new(FileOrderLog::new(&self.config.storage.orders_file)),
        };

        let notifications = match self.notifications.take() {
            Some(notifications) => notifications,
            None => Notifications::from_config(&self.config.notifications)?,
        };

        if !notifications.is_enabled() {
            tracing::info!("Email notifications disabled; orders are only written to the log");
        }

        Ok(OrderIntake::new(log, notifications))
    }

    /// Build the final router
    ///
    /// API routes come first; anything else falls through to the static form
    /// assets.
    pub fn build(mut self) -> Result<Router> {
        let intake = self.build_intake()?;

        let app = build_api_routes(AppState::new(intake))
            .merge(build_static_routes(&self.config.server.static_dir))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            );

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Fish Parque server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
