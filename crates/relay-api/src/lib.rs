//! # relay-api
//!
//! HTTP API layer for arc-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Webhook endpoint that verifies and records order status changes
//! - Order creation relayed to the payment provider
//! - Snapshot of the in-memory order store
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | All tracked orders |
//! | GET | `/health` | Health check |
//! | GET | `/orders/{uuid}` | Single order |
//! | POST | `/create` | Create an order at the provider |
//! | POST | `/webhook` | Provider webhook |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
