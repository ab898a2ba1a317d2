//! The fixed product catalogue and its minimum-quantity table

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product that can be ordered through the intake form
///
/// The set is closed: the form only offers these three, and the endpoint
/// rejects anything else with "Invalid product selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    FishFeed,
    Catfish,
    Materials,
}

impl Product {
    /// Every product, in the order the form lists them
    pub const ALL: [Product; 3] = [Product::FishFeed, Product::Catfish, Product::Materials];

    /// Identifier used by the form and the JSON payload
    pub fn id(&self) -> &'static str {
        match self {
            Product::FishFeed => "fish_feed",
            Product::Catfish => "catfish",
            Product::Materials => "materials",
        }
    }

    /// Human-readable name used in messages, the log line and the email
    pub fn display_name(&self) -> &'static str {
        match self {
            Product::FishFeed => "Fish Feed",
            Product::Catfish => "Catfish",
            Product::Materials => "Materials",
        }
    }

    /// Minimum orderable quantity in kilograms
    pub fn min_quantity(&self) -> u32 {
        match self {
            Product::FishFeed => 10,
            Product::Catfish => 1,
            Product::Materials => 50,
        }
    }

    /// Look a product up by its form identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Whether `quantity` satisfies this product's minimum
    ///
    /// NaN never satisfies a minimum.
    pub fn accepts_quantity(&self, quantity: f64) -> bool {
        !quantity.is_nan() && quantity >= f64::from(self.min_quantity())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Catalogue entry exposed by `GET /api/products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub min_quantity: u32,
}

impl From<Product> for ProductInfo {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.display_name().to_string(),
            min_quantity: product.min_quantity(),
        }
    }
}

/// The whole minimum-quantity table
pub fn catalogue() -> Vec<ProductInfo> {
    Product::ALL.into_iter().map(ProductInfo::from).collect()
}
