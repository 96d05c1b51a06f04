//! # Relay Error Types
//!
//! Typed error handling for arc-relay.
//! All relay operations return `Result<T, RelayError>`.
//!
//! The `Display` text of each variant is what callers see as the plain-text
//! response body; details carried in the variants are for logs.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing keys, unreadable template)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Webhook arrived without an `X-Signature` header
    #[error("Missing signature header")]
    MissingSignature,

    /// Request body could not be buffered
    #[error("Failed to read request body")]
    UnreadableBody(String),

    /// Webhook signature did not match the payload
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook body is not a JSON object
    #[error("Invalid JSON format")]
    InvalidJson(String),

    /// A known webhook event is missing required fields
    #[error("Malformed {event} payload")]
    MalformedEvent { event: String, reason: String },

    /// Order not present in the store
    #[error("Order not found: {uuid}")]
    OrderNotFound { uuid: String },

    /// Outbound order payload could not be serialized
    #[error("Failed to encode order data")]
    Encoding(String),

    /// Outbound HTTP request could not be built
    #[error("Failed to create request")]
    RequestBuild(String),

    /// Network/HTTP error communicating with the provider
    #[error("Failed to send request to {provider}")]
    Network { provider: String, message: String },

    /// Provider answered with a non-200 status
    #[error("Failed to create order")]
    UpstreamStatus { status: u16, body: String },

    /// Provider response body could not be read
    #[error("Failed to read response body")]
    ResponseRead(String),

    /// Provider response is not the expected JSON shape
    #[error("Invalid response format")]
    InvalidResponse(String),
}

impl RelayError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) => 500,
            RelayError::MissingSignature => 400,
            RelayError::UnreadableBody(_) => 400,
            RelayError::InvalidSignature => 403,
            RelayError::InvalidJson(_) => 400,
            RelayError::MalformedEvent { .. } => 400,
            RelayError::OrderNotFound { .. } => 404,
            RelayError::Encoding(_) => 500,
            RelayError::RequestBuild(_) => 500,
            RelayError::Network { .. } => 500,
            RelayError::UpstreamStatus { status, .. } => *status,
            RelayError::ResponseRead(_) => 500,
            RelayError::InvalidResponse(_) => 500,
        }
    }

    /// Detail suitable for a log line, beyond the public message
    pub fn detail(&self) -> Option<&str> {
        match self {
            RelayError::UnreadableBody(d)
            | RelayError::InvalidJson(d)
            | RelayError::Encoding(d)
            | RelayError::RequestBuild(d)
            | RelayError::ResponseRead(d)
            | RelayError::InvalidResponse(d) => Some(d),
            RelayError::MalformedEvent { reason, .. } => Some(reason),
            RelayError::Network { message, .. } => Some(message),
            RelayError::UpstreamStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
            && !matches!(self, RelayError::UpstreamStatus { .. })
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
