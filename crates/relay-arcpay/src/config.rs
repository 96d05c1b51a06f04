//! # ArcPay Configuration
//!
//! Configuration for the ArcPay integration.
//! All secrets are loaded from environment variables.

use std::time::Duration;

/// Default ArcPay API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://arcpay.online/api/v1/arcpay";

/// Default timeout for outbound API calls, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// ArcPay API configuration
#[derive(Clone)]
pub struct ArcPayConfig {
    /// API key sent in the `ArcKey` header (`ARC_KEY`)
    pub api_key: Option<String>,

    /// Shared webhook signing secret (`PRIVATE_KEY`)
    pub webhook_secret: Option<String>,

    /// API base URL (`ARCPAY_API_URL`, overridable for testing)
    pub api_base_url: String,

    /// Timeout for outbound API calls (`ARCPAY_TIMEOUT_SECS`)
    pub request_timeout: Duration,
}

impl ArcPayConfig {
    /// Load configuration through a variable lookup.
    ///
    /// Nothing is required: a missing `PRIVATE_KEY` rejects every webhook and
    /// a missing `ARC_KEY` fails order creation.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("ARC_KEY"),
            webhook_secret: non_empty("PRIVATE_KEY"),
            api_base_url: non_empty("ARCPAY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            request_timeout: non_empty("ARCPAY_TIMEOUT_SECS")
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or_else(default_request_timeout),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            webhook_secret: Some(webhook_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Order creation endpoint
    pub fn order_url(&self) -> String {
        format!("{}/order", self.api_base_url)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn has_webhook_secret(&self) -> bool {
        self.webhook_secret.is_some()
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

impl std::fmt::Debug for ArcPayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcPayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ArcPayConfig::from_vars(vars(&[]));

        assert!(!config.has_api_key());
        assert!(!config.has_webhook_secret());
        assert_eq!(config.order_url(), "https://arcpay.online/api/v1/arcpay/order");
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let config = ArcPayConfig::from_vars(vars(&[("PRIVATE_KEY", "  "), ("ARC_KEY", "k")]));

        assert!(!config.has_webhook_secret());
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_custom_base_url() {
        let config = ArcPayConfig::from_vars(vars(&[("ARCPAY_API_URL", "http://localhost:9000/")]));
        assert_eq!(config.order_url(), "http://localhost:9000/order");
    }

    #[test]
    fn test_request_timeout() {
        let config = ArcPayConfig::from_vars(vars(&[]));
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = ArcPayConfig::from_vars(vars(&[("ARCPAY_TIMEOUT_SECS", "5")]));
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        for bad in ["0", "soon"] {
            let config = ArcPayConfig::from_vars(vars(&[("ARCPAY_TIMEOUT_SECS", bad)]));
            assert_eq!(config.request_timeout, Duration::from_secs(30));
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ArcPayConfig::new("arc_live_value", "whsec_live_value");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("arc_live_value"));
        assert!(!debug.contains("whsec_live_value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
