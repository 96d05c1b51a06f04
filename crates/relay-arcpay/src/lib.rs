//! # relay-arcpay
//!
//! ArcPay provider for arc-relay.
//!
//! - **ArcPayProvider**: creates orders through `POST /order` and verifies
//!   webhook signatures. Implements `relay_core::PaymentProvider`.
//! - **SignatureVerifier**: HMAC-SHA256 over the raw webhook body, hex encoded.
//! - **webhook**: typed decoding of webhook payloads and dispatch to a
//!   `WebhookHandler` (implemented by `OrderStore`).
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use relay_arcpay::webhook::{decode_payload, dispatch_webhook_event, WebhookEvent};
//!
//! if !provider.verify_signature(&body, signature) {
//!     return Err(RelayError::InvalidSignature);
//! }
//! let payload = decode_payload(&body)?;
//! let event = WebhookEvent::from_payload(&payload)?;
//! dispatch_webhook_event(&store, event).await?;
//! ```

pub mod client;
pub mod config;
pub mod signature;
pub mod webhook;

// Re-exports
pub use client::ArcPayProvider;
pub use config::ArcPayConfig;
pub use signature::SignatureVerifier;
pub use webhook::{
    decode_payload, dispatch_webhook_event, OrderStatusChange, WebhookEvent, WebhookHandler,
    ORDER_STATUS_CHANGED,
};
