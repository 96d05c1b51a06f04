//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the order store, the payment provider, and the order template.

use anyhow::Context;
use relay_arcpay::{ArcPayConfig, ArcPayProvider};
use relay_core::{BoxedPaymentProvider, OrderStore, OrderTemplate};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the order template is looked up when `ORDER_TEMPLATE` is unset
const TEMPLATE_PATHS: [&str; 3] = [
    "config/order.toml",
    "../config/order.toml",
    "../../config/order.toml",
];

/// Application configuration, assembled once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Explicit order template file
    pub order_template: Option<PathBuf>,
    /// Payment provider settings
    pub arcpay: ArcPayConfig,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load through a variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(1080),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_json: lookup("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            order_template: lookup("ORDER_TEMPLATE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            arcpay: ArcPayConfig::from_vars(&lookup),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tracked orders
    pub store: OrderStore,
    /// Remote payment API
    pub provider: BoxedPaymentProvider,
    /// Shape of created orders
    pub template: Arc<OrderTemplate>,
}

impl AppState {
    /// Create a new AppState backed by ArcPay
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let template = load_order_template(config.order_template.as_deref())?;

        let provider = ArcPayProvider::new(config.arcpay.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize ArcPay: {}", e))?;

        Ok(Self::with_provider(Arc::new(provider), template))
    }

    /// Create with an explicit provider and template
    pub fn with_provider(provider: BoxedPaymentProvider, template: OrderTemplate) -> Self {
        Self {
            store: OrderStore::new(),
            provider,
            template: Arc::new(template),
        }
    }
}

/// Load the order template from config, falling back to the built-in one
fn load_order_template(explicit: Option<&Path>) -> anyhow::Result<OrderTemplate> {
    if let Some(path) = explicit {
        let template = OrderTemplate::from_file(path)?;
        tracing::info!("Loaded order template from {}", path.display());
        return Ok(template);
    }

    for path in TEMPLATE_PATHS {
        if Path::new(path).is_file() {
            let template = OrderTemplate::from_file(path)?;
            tracing::info!(
                "Loaded order template with {} items from {}",
                template.items.len(),
                path
            );
            return Ok(template);
        }
    }

    tracing::warn!("No order template found, using built-in catalog");
    Ok(OrderTemplate::default())
}
