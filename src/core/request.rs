//! Incoming order payload and its validation
//!
//! The browser posts whatever the form holds, so every field is accepted as a
//! raw JSON value and interpreted loosely: a field counts as present when it is
//! "truthy" (not missing, `null`, `false`, `0` or blank), and `quantity` is read
//! the way `parseFloat` would read it.

use crate::core::error::OrderError;
use crate::core::order::format_number;
use crate::core::product::Product;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use validator::Validate;

/// The JSON body of `POST /api/order`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub product: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub product: Product,
    pub quantity: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Validate)]
struct RequiredFields {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    address: String,
    #[validate(length(min = 1))]
    phone: String,
    #[validate(length(min = 1))]
    product: String,
}

impl OrderRequest {
    /// Check the submission and turn it into [`OrderDetails`]
    ///
    /// Checks run in a fixed order and the first failure wins: required
    /// fields, then the product, then the quantity.
    pub fn validated(&self) -> Result<OrderDetails, OrderError> {
        let required = RequiredFields {
            name: text_field(self.name.as_ref()).unwrap_or_default(),
            address: text_field(self.address.as_ref()).unwrap_or_default(),
            phone: text_field(self.phone.as_ref()).unwrap_or_default(),
            product: text_field(self.product.as_ref()).unwrap_or_default(),
        };

        if let Err(errors) = required.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect();
            fields.sort();
            return Err(OrderError::MissingFields { fields });
        }

        let product =
            Product::from_id(&required.product).ok_or_else(|| OrderError::InvalidProduct {
                product: required.product.clone(),
            })?;

        let quantity = parse_quantity(self.quantity.as_ref());
        if !product.accepts_quantity(quantity) {
            return Err(OrderError::InsufficientQuantity { product, quantity });
        }

        Ok(OrderDetails {
            name: required.name,
            address: required.address,
            phone: required.phone,
            product,
            quantity,
            notes: text_field(self.notes.as_ref()),
        })
    }
}

/// Read a free-text field, returning `None` when it is falsy or blank
pub fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null | Value::Bool(false) => return None,
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };

    if text.is_empty() { None } else { Some(text) }
}

/// Read `quantity` the way `parseFloat` does
///
/// JSON numbers are taken as-is; strings contribute their longest leading
/// numeric prefix (`"12kg"` reads as 12). Anything else is NaN.
pub fn parse_quantity(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

fn parse_float_prefix(input: &str) -> f64 {
    static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMERIC_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
    });

    regex
        .find(input.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> OrderRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "name": "Ada",
            "address": "12 Lane",
            "phone": "555-1",
            "product": "catfish",
            "quantity": 1,
            "notes": ""
        })
    }

    #[test]
    fn test_valid_request() {
        let details = request(valid_body()).validated().unwrap();
        assert_eq!(details.name, "Ada");
        assert_eq!(details.product, Product::Catfish);
        assert_eq!(details.quantity, 1.0);
        assert_eq!(details.notes, None);
    }

    #[test]
    fn test_missing_fields_reported_before_product() {
        let mut body = valid_body();
        body["phone"] = json!("   ");
        body["product"] = json!("shrimp");

        match request(body).validated() {
            Err(OrderError::MissingFields { fields }) => assert_eq!(fields, vec!["phone"]),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_fields_are_missing() {
        let err = request(json!({ "product": "catfish", "quantity": 3 }))
            .validated()
            .unwrap_err();
        match err {
            OrderError::MissingFields { fields } => {
                assert_eq!(fields, vec!["address", "name", "phone"])
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_product() {
        let mut body = valid_body();
        body["product"] = json!("shrimp");
        assert!(matches!(
            request(body).validated(),
            Err(OrderError::InvalidProduct { product }) if product == "shrimp"
        ));
    }

    #[test]
    fn test_quantity_checks() {
        let mut body = valid_body();
        body["product"] = json!("materials");
        body["quantity"] = json!(40);
        assert!(matches!(
            request(body.clone()).validated(),
            Err(OrderError::InsufficientQuantity {
                product: Product::Materials,
                ..
            })
        ));

        body["quantity"] = json!("not a number");
        assert!(request(body.clone()).validated().is_err());

        body["quantity"] = Value::Null;
        assert!(request(body.clone()).validated().is_err());

        body["quantity"] = json!("50");
        assert_eq!(request(body).validated().unwrap().quantity, 50.0);
    }

    #[test]
    fn test_notes_are_trimmed() {
        let mut body = valid_body();
        body["notes"] = json!("  call first  ");
        let details = request(body).validated().unwrap();
        assert_eq!(details.notes.as_deref(), Some("call first"));
    }

    #[test]
    fn test_text_field_falsy_values() {
        assert_eq!(text_field(None), None);
        assert_eq!(text_field(Some(&Value::Null)), None);
        assert_eq!(text_field(Some(&json!(false))), None);
        assert_eq!(text_field(Some(&json!(0))), None);
        assert_eq!(text_field(Some(&json!(""))), None);
        assert_eq!(text_field(Some(&json!(42))), Some("42".to_string()));
    }

    #[test]
    fn test_numeric_text_fields_print_like_javascript() {
        assert_eq!(text_field(Some(&json!(1.0))), Some("1".to_string()));
        assert_eq!(text_field(Some(&json!(5551234.5))), Some("5551234.5".to_string()));

        let mut body = valid_body();
        body["phone"] = json!(5551234.0);
        let details = request(body).validated().unwrap();
        assert_eq!(details.phone, "5551234");
    }

    #[test]
    fn test_parse_quantity_like_parse_float() {
        assert_eq!(parse_quantity(Some(&json!(12.5))), 12.5);
        assert_eq!(parse_quantity(Some(&json!("12kg"))), 12.0);
        assert_eq!(parse_quantity(Some(&json!("  7.25 "))), 7.25);
        assert_eq!(parse_quantity(Some(&json!(".5"))), 0.5);
        assert_eq!(parse_quantity(Some(&json!("1e2"))), 100.0);
        assert_eq!(parse_quantity(Some(&json!("-3"))), -3.0);
        assert!(parse_quantity(Some(&json!("kg12"))).is_nan());
        assert!(parse_quantity(Some(&json!(""))).is_nan());
        assert!(parse_quantity(Some(&json!(true))).is_nan());
        assert!(parse_quantity(None).is_nan());
    }
}
