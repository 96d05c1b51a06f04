//! # ArcPay Order API
//!
//! Creates orders through `POST {base}/order` and verifies webhook
//! signatures. One attempt per call; failures are surfaced, never retried.

use crate::config::ArcPayConfig;
use crate::signature::SignatureVerifier;
use async_trait::async_trait;
use relay_core::{
    CatalogItem, OrderRequest, PaymentProvider, ProviderOrder, RelayError, RelayResult,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "ArcKey";

const PROVIDER: &str = "ArcPay";

/// ArcPay payment provider
pub struct ArcPayProvider {
    config: ArcPayConfig,
    client: Client,
    verifier: SignatureVerifier,
}

impl ArcPayProvider {
    /// Create a new ArcPay provider
    pub fn new(config: ArcPayConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let verifier = SignatureVerifier::new(config.webhook_secret.clone());

        Ok(Self {
            config,
            client,
            verifier,
        })
    }

    /// Convert our request to ArcPay's wire shape
    fn build_payload(request: &OrderRequest) -> ArcPayOrderPayload<'_> {
        ArcPayOrderPayload {
            title: &request.title,
            order_id: &request.order_id,
            currency: &request.currency,
            items: request.items.iter().map(ArcPayItem::from).collect(),
            meta: ArcPayMeta {
                telegram_id: request.telegram_id.as_deref(),
            },
            captured: request.captured,
        }
    }
}

#[async_trait]
impl PaymentProvider for ArcPayProvider {
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    async fn create_order(&self, request: &OrderRequest) -> RelayResult<ProviderOrder> {
        let payload = serde_json::to_vec(&Self::build_payload(request))
            .map_err(|e| RelayError::Encoding(e.to_string()))?;

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| RelayError::Configuration("ARC_KEY not set".to_string()))?;

        debug!(
            "Creating ArcPay order: {} items, total={} {}",
            request.item_count(),
            request.total(),
            request.currency
        );

        let http_request = self
            .client
            .post(self.config.order_url())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(payload)
            .build()
            .map_err(|e| RelayError::RequestBuild(e.to_string()))?;

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| RelayError::Network {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Failed to create order. Status: {}, Error: {}",
                status.as_u16(),
                body
            );
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw_body = response
            .bytes()
            .await
            .map_err(|e| RelayError::ResponseRead(e.to_string()))?;

        let created: ArcPayOrderResponse = serde_json::from_slice(&raw_body)
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;

        info!("Order created successfully: uuid={}", created.uuid);

        Ok(ProviderOrder {
            uuid: created.uuid,
            raw_body: raw_body.to_vec(),
        })
    }

    fn verify_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.verifier.verify(payload, signature)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// ArcPay API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArcPayOrderPayload<'a> {
    title: &'a str,
    order_id: &'a str,
    currency: &'a str,
    items: Vec<ArcPayItem<'a>>,
    meta: ArcPayMeta<'a>,
    captured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArcPayItem<'a> {
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    price: f64,
    count: u32,
    item_id: &'a str,
}

impl<'a> From<&'a CatalogItem> for ArcPayItem<'a> {
    fn from(item: &'a CatalogItem) -> Self {
        Self {
            title: &item.title,
            description: &item.description,
            image_url: &item.image_url,
            price: item.price,
            count: item.count,
            item_id: &item.item_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct ArcPayMeta<'a> {
    telegram_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ArcPayOrderResponse {
    uuid: String,
}
