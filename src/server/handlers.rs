//! HTTP handlers for the order API
//!
//! Every response from `/api/order` is HTTP 200; success and failure are told
//! apart by the `success` flag in the body.

use crate::core::{OrderError, OrderResponse, ProductInfo, catalogue};
use crate::server::extract::OrderPayload;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Body returned by `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Fish Parque API is running".to_string(),
    })
}

/// List the products and their minimum quantities
pub async fn list_products() -> Json<Vec<ProductInfo>> {
    Json(catalogue())
}

/// Place an order submitted as JSON or as a urlencoded form
pub async fn submit_order(
    State(state): State<AppState>,
    OrderPayload(request): OrderPayload,
) -> Result<Json<OrderResponse>, OrderError> {
    match state.intake.place(&request).await {
        Ok(order) => Ok(Json(OrderResponse::success(order.confirmation_message()))),
        Err(error) => {
            if error.is_validation() {
                tracing::info!(error = %error, "Order rejected");
            }
            Err(error)
        }
    }
}

/// Turn a panic inside a handler into the generic failure body
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    OrderError::Internal(detail).into_response()
}
