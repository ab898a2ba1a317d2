//! Router builder utilities

use crate::server::handlers::{handle_panic, health_check, list_products, submit_order};
use crate::server::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::path::Path;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;

/// Build the API routes
///
/// - GET /api/health - Liveness check
/// - GET /api/products - Product catalogue with minimum quantities
/// - POST /api/order - Place an order
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/products", get(list_products))
        .route("/api/order", post(submit_order))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Serve the order form and its assets
///
/// `GET /` resolves to `index.html` in `static_dir`.
pub fn build_static_routes(static_dir: impl AsRef<Path>) -> Router {
    Router::new().fallback_service(ServeDir::new(static_dir.as_ref()))
}
