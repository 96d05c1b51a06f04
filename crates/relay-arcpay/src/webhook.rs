//! # ArcPay Webhook Handling
//!
//! Typed decoding of ArcPay webhook payloads.
//! Only `order.status.changed` carries data the relay acts on; every other
//! event is acknowledged and logged.

use async_trait::async_trait;
use relay_core::order::STATUS_RECEIVED;
use relay_core::{OrderStore, RelayError, RelayResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Event name for order status notifications
pub const ORDER_STATUS_CHANGED: &str = "order.status.changed";

/// `data` of an `order.status.changed` event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderStatusChange {
    pub uuid: String,
    pub status: String,
}

impl OrderStatusChange {
    /// Check if the order was paid
    pub fn is_received(&self) -> bool {
        self.status == STATUS_RECEIVED
    }
}

/// A decoded webhook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// An order moved to a new status
    OrderStatusChanged(OrderStatusChange),
    /// Any other event (or none); `None` when `event` is absent or not a string
    Other(Option<String>),
}

impl WebhookEvent {
    /// Decode an event from an already-parsed payload object
    pub fn from_payload(payload: &Map<String, Value>) -> RelayResult<Self> {
        let event = payload.get("event").and_then(Value::as_str);

        match event {
            Some(ORDER_STATUS_CHANGED) => {
                let data = payload.get("data").cloned().unwrap_or(Value::Null);
                let change = OrderStatusChange::deserialize(data).map_err(|e| {
                    RelayError::MalformedEvent {
                        event: ORDER_STATUS_CHANGED.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(WebhookEvent::OrderStatusChanged(change))
            }
            other => Ok(WebhookEvent::Other(other.map(String::from))),
        }
    }
}

/// Parse a raw webhook body into a JSON object
pub fn decode_payload(body: &[u8]) -> RelayResult<Map<String, Value>> {
    serde_json::from_slice(body).map_err(|e| RelayError::InvalidJson(e.to_string()))
}

/// Webhook event handler trait
///
/// Implement this trait to react to webhook events.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Called when an order changes status
    async fn on_order_status_changed(&self, change: OrderStatusChange) -> RelayResult<()>;

    /// Called for events the relay does not act on
    async fn on_unhandled_event(&self, event: Option<&str>) -> RelayResult<()> {
        debug!("Unhandled webhook event: {:?}", event);
        Ok(())
    }
}

/// Dispatch a webhook event to the appropriate handler method
pub async fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: WebhookEvent,
) -> RelayResult<()> {
    match event {
        WebhookEvent::OrderStatusChanged(change) => handler.on_order_status_changed(change).await,
        WebhookEvent::Other(name) => handler.on_unhandled_event(name.as_deref()).await,
    }
}

#[async_trait]
impl WebhookHandler for OrderStore {
    async fn on_order_status_changed(&self, change: OrderStatusChange) -> RelayResult<()> {
        if change.is_received() {
            info!("Order {} received successfully!", change.uuid);
        }
        let previous = self.upsert_status(&change.uuid, &change.status).await;
        debug!("Replaced order status: {:?}", previous.map(|o| o.status));
        Ok(())
    }
}
