//! Typed errors for the order pipeline
//!
//! Every failure a customer can run into is a variant of [`OrderError`]. The
//! `Display` text is meant for logs; what the browser sees comes from
//! [`OrderError::client_message`], which never leaks internal detail.
//!
//! # Error Categories
//!
//! - Request validation: [`OrderError::MissingFields`],
//!   [`OrderError::InvalidProduct`], [`OrderError::InsufficientQuantity`]
//! - Persistence: [`OrderError::Persistence`] (fatal, stops before notifying)
//! - Everything else: [`OrderError::MalformedRequest`], [`OrderError::Internal`]
//!
//! Notification failures have their own type,
//! [`crate::notify::NotifyError`], and never reach the caller.

use crate::core::order::OrderResponse;
use crate::core::product::Product;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Generic message for anything the customer cannot act on
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors produced while placing an order
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// One of name, address, phone or product is missing or blank
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// The product identifier is not in the catalogue
    #[error("invalid product '{product}'")]
    InvalidProduct { product: String },

    /// Quantity is not a number or is below the product minimum
    #[error("quantity {quantity} below minimum {} for {product}", .product.min_quantity())]
    InsufficientQuantity { product: Product, quantity: f64 },

    /// Appending the order line failed
    #[error("failed to append order to log: {0}")]
    Persistence(#[source] std::io::Error),

    /// The request body could not be read as a JSON order
    #[error("malformed order request: {0}")]
    MalformedRequest(String),

    /// Anything unexpected (including a panic inside the handler)
    #[error("internal error: {0}")]
    Internal(String),
}

impl OrderError {
    /// The message shown to the customer
    pub fn client_message(&self) -> String {
        match self {
            OrderError::MissingFields { .. } => "All required fields must be filled".to_string(),
            OrderError::InvalidProduct { .. } => "Invalid product selected".to_string(),
            OrderError::InsufficientQuantity { product, .. } => format!(
                "Quantity does not meet minimum requirement for {} (Min: {}kg)",
                product.display_name(),
                product.min_quantity()
            ),
            OrderError::Persistence(_) => "Unable to save order. Please try again.".to_string(),
            OrderError::MalformedRequest(_) | OrderError::Internal(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// Whether the error came from validating the submitted fields
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrderError::MissingFields { .. }
                | OrderError::InvalidProduct { .. }
                | OrderError::InsufficientQuantity { .. }
        )
    }
}

/// Failures are reported in the body; the status is always 200
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let body = Json(OrderResponse::failure(self.client_message()));
        (StatusCode::OK, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages() {
        let missing = OrderError::MissingFields {
            fields: vec!["name".to_string()],
        };
        assert_eq!(missing.client_message(), "All required fields must be filled");

        let invalid = OrderError::InvalidProduct {
            product: "shrimp".to_string(),
        };
        assert_eq!(invalid.client_message(), "Invalid product selected");

        let short = OrderError::InsufficientQuantity {
            product: Product::Materials,
            quantity: 40.0,
        };
        assert_eq!(
            short.client_message(),
            "Quantity does not meet minimum requirement for Materials (Min: 50kg)"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert_eq!(
            OrderError::Persistence(io).client_message(),
            "Unable to save order. Please try again."
        );

        assert_eq!(
            OrderError::Internal("boom".to_string()).client_message(),
            GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = OrderError::Persistence(io);
        assert!(err.to_string().contains("read-only"));

        let err = OrderError::MissingFields {
            fields: vec!["name".to_string(), "phone".to_string()],
        };
        assert_eq!(err.to_string(), "missing required fields: name, phone");
    }

    #[test]
    fn test_is_validation() {
        assert!(
            OrderError::InvalidProduct {
                product: "x".to_string()
            }
            .is_validation()
        );
        assert!(!OrderError::Internal("x".to_string()).is_validation());
    }

    #[test]
    fn test_into_response_is_always_ok() {
        let response = OrderError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
