//! A placed order and the text it produces
//!
//! An [`Order`] only lives for the duration of a request. Its lasting form is
//! the single line returned by [`Order::log_line`].

use crate::core::product::Product;
use crate::core::request::OrderDetails;
use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of every order number
pub const ORDER_NUMBER_PREFIX: &str = "FP";

/// Format of the order date (second precision, local time)
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body returned by `POST /api/order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
}

impl OrderResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A validated order with its number and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub number: String,
    pub placed_at: DateTime<Local>,
    pub details: OrderDetails,
}

impl Order {
    /// Stamp validated details with a fresh order number
    pub fn new(details: OrderDetails, placed_at: DateTime<Local>) -> Self {
        Self {
            number: generate_order_number(placed_at),
            placed_at,
            details,
        }
    }

    pub fn product(&self) -> Product {
        self.details.product
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn date(&self) -> String {
        self.placed_at.format(ORDER_DATE_FORMAT).to_string()
    }

    /// Quantity as a JavaScript number would print it (`1`, `12.5`)
    pub fn quantity_display(&self) -> String {
        format_number(self.details.quantity)
    }

    /// Notes, or the literal `None` when there are none
    pub fn notes_display(&self) -> &str {
        self.details.notes.as_deref().unwrap_or("None")
    }

    /// The record appended to the order log, without a trailing newline
    ///
    /// Free-text fields are written verbatim. A `|` inside an address ends up
    /// looking like a field separator; nothing reads the log back, so that is
    /// left alone.
    pub fn log_line(&self) -> String {
        format!(
            "Order #{} | Date: {} | Name: {} | Phone: {} | Address: {} | Product: {} | Quantity: {}kg | Notes: {}",
            self.number,
            self.date(),
            self.details.name,
            self.details.phone,
            self.details.address,
            self.details.product.display_name(),
            self.quantity_display(),
            self.notes_display(),
        )
    }

    /// Message returned to the customer once the order is saved
    pub fn confirmation_message(&self) -> String {
        format!(
            "Thank you! Your order #{} has been placed successfully. We will contact you shortly.",
            self.number
        )
    }
}

/// `FP` + epoch milliseconds + a random number below 1000
///
/// Two orders in the same millisecond collide one time in a thousand.
pub fn generate_order_number(now: DateTime<Local>) -> String {
    let suffix: u16 = rand::rng().random_range(0..1000);
    format!("{}{}{}", ORDER_NUMBER_PREFIX, now.timestamp_millis(), suffix)
}

/// Print a number the way JavaScript's `String(n)` does
///
/// Magnitudes from 1e21 up and below 1e-6 switch to exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`).
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent_form = format!("{:e}", value);
        return match exponent_form.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exponent_form,
        };
    }

    value.to_string()
}
