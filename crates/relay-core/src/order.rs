//! # Order Types
//!
//! Tracked orders and the outbound order-creation request.

use crate::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Status recorded when the provider accepts a new order
pub const STATUS_CREATED: &str = "created";

/// Status the provider sends once the customer has paid
pub const STATUS_RECEIVED: &str = "received";

/// A tracked order
///
/// `status` is free-form: whatever the provider last reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Provider-assigned identifier
    pub uuid: String,

    /// Last known status
    pub status: String,
}

impl Order {
    pub fn new(uuid: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            status: status.into(),
        }
    }

    /// Order the provider has just accepted
    pub fn created(uuid: impl Into<String>) -> Self {
        Self::new(uuid, STATUS_CREATED)
    }
}

/// An order to be created at the payment provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Order title shown to the customer
    pub title: String,

    /// Our invoice id (`INV-<unix seconds>`)
    pub order_id: String,

    /// Currency code (e.g. "TON")
    pub currency: String,

    /// Line items
    pub items: Vec<CatalogItem>,

    /// Telegram id of the caller, passed through as metadata
    #[serde(default)]
    pub telegram_id: Option<String>,

    /// Whether the payment is captured immediately
    #[serde(default)]
    pub captured: bool,
}

impl OrderRequest {
    /// Sum of `price * count` over all items
    pub fn total(&self) -> f64 {
        self.items.iter().map(CatalogItem::total).sum()
    }

    /// Number of units across all items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.count).sum()
    }
}

/// Result of a successful order creation at the provider
#[derive(Debug, Clone)]
pub struct ProviderOrder {
    /// Provider-assigned order identifier
    pub uuid: String,

    /// Response body exactly as the provider sent it
    pub raw_body: Vec<u8>,
}
