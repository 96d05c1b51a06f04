//! # Request Handlers
//!
//! Axum request handlers for the relay API.
//! Errors are answered as plain text with the status from `RelayError::status_code`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use chrono::Utc;
use relay_arcpay::webhook::{decode_payload, dispatch_webhook_event, WebhookEvent};
use relay_core::{Order, RelayError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tracing::{error, info, instrument, warn};

/// Header carrying the webhook HMAC
pub const SIGNATURE_HEADER: &str = "x-signature";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Acknowledgement sent for every accepted webhook
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

impl WebhookAck {
    fn received() -> Self {
        Self {
            status: "Webhook received successfully",
        }
    }
}

/// Create order parameters
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderParams {
    /// Telegram id of the buyer (optional)
    #[serde(default)]
    pub telegram_id: Option<String>,
}

/// Create order input, read from a form body, a JSON body, or the query string.
///
/// The body wins over the query string. A body that does not decode is
/// treated as absent.
#[derive(Debug, Default)]
pub struct CreateOrderInput {
    pub telegram_id: Option<String>,
}

impl<S> FromRequest<S> for CreateOrderInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<CreateOrderParams>::try_from_uri(req.uri())
            .map(|Query(params)| params)
            .unwrap_or_default();

        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let body = if is_json {
            Json::<CreateOrderParams>::from_request(req, state)
                .await
                .ok()
                .map(|Json(params)| params)
        } else {
            Form::<CreateOrderParams>::from_request(req, state)
                .await
                .ok()
                .map(|Form(params)| params)
        };

        let telegram_id = body
            .and_then(|params| params.telegram_id)
            .or(query.telegram_id)
            .filter(|id| !id.is_empty());

        Ok(Self { telegram_id })
    }
}

fn relay_error_to_response(err: RelayError) -> (StatusCode, String) {
    let code = err.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        err.to_string(),
    )
}

/// Log a rejected request and convert the error
fn reject(err: RelayError) -> (StatusCode, String) {
    let detail = err.detail().unwrap_or_default();
    if err.is_client_error() {
        warn!("Rejected request: {} {}", err, detail);
    } else {
        error!("Request failed: {} {}", err, detail);
    }
    relay_error_to_response(err)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "arc-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle a provider webhook
#[instrument(skip_all)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WebhookAck>, (StatusCode, String)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or(RelayError::MissingSignature)
        .map_err(reject)?;

    let body = body
        .map_err(|e| RelayError::UnreadableBody(e.body_text()))
        .map_err(reject)?;

    if !state.provider.verify_signature(&body, signature) {
        return Err(reject(RelayError::InvalidSignature));
    }

    let payload = decode_payload(&body).map_err(reject)?;
    info!(payload = %serde_json::Value::Object(payload.clone()), "Webhook received");

    let event = WebhookEvent::from_payload(&payload).map_err(reject)?;
    dispatch_webhook_event(&state.store, event)
        .await
        .map_err(reject)?;

    Ok(Json(WebhookAck::received()))
}

/// Create an order at the provider and start tracking it
#[instrument(skip(state, input), fields(telegram_id = ?input.telegram_id))]
pub async fn create_order(
    State(state): State<AppState>,
    input: CreateOrderInput,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request = state.template.build_request(input.telegram_id, Utc::now());

    info!(
        "Creating order {} via {}: {} items",
        request.order_id,
        state.provider.provider_name(),
        request.item_count()
    );

    let created = state.provider.create_order(&request).await.map_err(|e| {
        error!("Failed to create order: {}", e);
        reject(e)
    })?;

    state.store.set(Order::created(created.uuid.as_str())).await;
    info!("Tracking order {}", created.uuid);

    Ok(([(CONTENT_TYPE, "application/json")], created.raw_body))
}

/// Get every tracked order
pub async fn snapshot(State(state): State<AppState>) -> Json<BTreeMap<String, Order>> {
    Json(state.store.snapshot().await)
}

/// Get a single tracked order
pub async fn get_order(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Order>, (StatusCode, String)> {
    state
        .store
        .get(&uuid)
        .await
        .map(Json)
        .ok_or_else(|| relay_error_to_response(RelayError::OrderNotFound { uuid }))
}
