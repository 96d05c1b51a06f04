//! # relay-core
//!
//! Core types and traits for the arc-relay payment order relay.
//!
//! This crate provides:
//! - `Order` and `OrderStore` for tracking order status in memory
//! - `OrderTemplate`, `CatalogItem` and `OrderRequest` for outbound order creation
//! - `PaymentProvider` trait for the remote payment API
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{Order, OrderStore, OrderTemplate};
//!
//! let store = OrderStore::new();
//! store.set(Order::created("a1b2")).await;
//!
//! let request = OrderTemplate::default().build_request(Some("42".into()), chrono::Utc::now());
//! let created = provider.create_order(&request).await?;
//! ```

pub mod catalog;
pub mod error;
pub mod order;
pub mod provider;
pub mod store;

// Re-exports for convenience
pub use catalog::{CatalogItem, OrderTemplate};
pub use error::{RelayError, RelayResult};
pub use order::{Order, OrderRequest, ProviderOrder};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
pub use store::OrderStore;
