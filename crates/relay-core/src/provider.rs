//! # Payment Provider Trait
//!
//! Seam between the HTTP layer and the remote payment API.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          PaymentProvider (trait)             │
//! │  ├── create_order()                          │
//! │  ├── verify_signature()                      │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                      ▲
//!              ┌───────┴───────┐
//!              │ ArcPayProvider│
//!              └───────────────┘
//! ```

use crate::error::RelayResult;
use crate::order::{OrderRequest, ProviderOrder};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote payment API used by the relay.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order at the provider.
    ///
    /// # Returns
    /// The provider's order id together with its raw response body.
    async fn create_order(&self, request: &OrderRequest) -> RelayResult<ProviderOrder>;

    /// Check a webhook signature against the raw payload.
    fn verify_signature(&self, payload: &[u8], signature: &str) -> bool;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
