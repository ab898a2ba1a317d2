//! Server module for building the order intake HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - The order, product and health API routes
//! - The static order form (`GET /` and its assets)

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use extract::OrderPayload;
pub use handlers::HealthResponse;
pub use state::AppState;
