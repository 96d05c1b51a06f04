//! # arc-relay
//!
//! Payment order relay for ArcPay.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export PRIVATE_KEY=...      # webhook signing secret
//! export ARC_KEY=...          # ArcPay API key
//! export PORT=1080
//!
//! # Run the server
//! arc-relay
//! ```

use relay_api::{routes, state::AppConfig, AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    print_banner();

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);
    info!("ArcPay API: {}", config.arcpay.api_base_url);
    if !config.arcpay.has_webhook_secret() {
        warn!("PRIVATE_KEY not set, every webhook will be rejected");
    }
    if !config.arcpay.has_api_key() {
        warn!("ARC_KEY not set, order creation will fail");
    }

    // Initialize application state
    let state = AppState::new(&config)?;
    info!("Order template: {} items", state.template.items.len());

    let app = routes::create_router(state);

    info!("Relay listening on http://{}", addr);

    if !is_prod {
        info!("Orders:  GET  http://{}/", addr);
        info!("Create:  POST http://{}/create", addr);
        info!("Webhook: POST http://{}/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  arc-relay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payment order relay
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
