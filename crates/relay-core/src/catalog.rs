//! # Order Template
//!
//! The fixed catalog every created order is built from.
//! Loaded from `config/order.toml` when present, otherwise the built-in default.

use crate::error::{RelayError, RelayResult};
use crate::order::OrderRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A purchasable item in the order template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Provider-side item id
    pub item_id: String,

    /// Display title
    pub title: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Image URL
    #[serde(default)]
    pub image_url: String,

    /// Unit price in the order currency
    pub price: f64,

    /// Quantity
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl CatalogItem {
    /// Price of this line (`price * count`)
    pub fn total(&self) -> f64 {
        self.price * self.count as f64
    }
}

/// Shape of every order this relay creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTemplate {
    pub title: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub captured: bool,

    #[serde(default, rename = "item")]
    pub items: Vec<CatalogItem>,
}

fn default_currency() -> String {
    "TON".to_string()
}

impl OrderTemplate {
    /// Parse a template from TOML text
    pub fn from_toml(content: &str) -> RelayResult<Self> {
        let template: OrderTemplate = toml::from_str(content)
            .map_err(|e| RelayError::Configuration(format!("Invalid order template: {}", e)))?;

        if template.items.is_empty() {
            return Err(RelayError::Configuration(
                "Order template has no items".to_string(),
            ));
        }

        Ok(template)
    }

    /// Read and parse a template file
    pub fn from_file(path: impl AsRef<Path>) -> RelayResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Invoice id derived from the creation time
    pub fn order_id_at(now: DateTime<Utc>) -> String {
        format!("INV-{}", now.timestamp())
    }

    /// Build the outbound request for one order
    pub fn build_request(&self, telegram_id: Option<String>, now: DateTime<Utc>) -> OrderRequest {
        OrderRequest {
            title: self.title.clone(),
            order_id: Self::order_id_at(now),
            currency: self.currency.clone(),
            items: self.items.clone(),
            telegram_id,
            captured: self.captured,
        }
    }
}

impl Default for OrderTemplate {
    fn default() -> Self {
        Self {
            title: "Premium Subscription Box".to_string(),
            currency: default_currency(),
            captured: false,
            items: vec![
                CatalogItem {
                    item_id: "id-987654".to_string(),
                    title: "Exclusive Travel Package".to_string(),
                    description: "A luxurious 5-day trip to Bali with first-class accommodation."
                        .to_string(),
                    image_url: "https://www.luxurytravelmagazine.com/files/610/1/2901/Kayon-Jungle-aerial_reg.jpg".to_string(),
                    price: 0.5,
                    count: 1,
                },
                CatalogItem {
                    item_id: "id-654321".to_string(),
                    title: "Gourmet Dinner Experience".to_string(),
                    description: "A 7-course gourmet dinner at a Michelin-starred restaurant."
                        .to_string(),
                    image_url: "https://www.luxurytravelmagazine.com/files/610/2/2572/Samabe-restaurant_big_reg.jpg".to_string(),
                    price: 0.15,
                    count: 2,
                },
            ],
        }
    }
}
