//! # Routes
//!
//! Axum router configuration for the relay API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /               - Snapshot of all tracked orders
/// - GET  /health         - Health check
/// - GET  /orders/{uuid}  - Single tracked order
/// - POST /create         - Create an order at the provider
/// - POST /webhook        - Provider webhook (raw body, `X-Signature`)
pub fn create_router(state: AppState) -> Router {
    // Browser demos call /create directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::snapshot))
        .route("/health", get(handlers::health))
        .route("/orders/{uuid}", get(handlers::get_order))
        .route("/create", post(handlers::create_order))
        .route("/webhook", post(handlers::receive_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use relay_arcpay::SignatureVerifier;
    use relay_core::{
        Order, OrderRequest, OrderTemplate, PaymentProvider, ProviderOrder, RelayError,
        RelayResult,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    const SECRET: &str = "test_private_key";

    /// What the fake provider answers to `create_order`
    enum Outcome {
        Created(&'static str),
        Status(u16),
    }

    struct FakeProvider {
        verifier: SignatureVerifier,
        outcome: Outcome,
        requests: Mutex<Vec<OrderRequest>>,
    }

    #[async_trait]
    impl PaymentProvider for FakeProvider {
        async fn create_order(&self, request: &OrderRequest) -> RelayResult<ProviderOrder> {
            self.requests.lock().unwrap().push(request.clone());
            match self.outcome {
                Outcome::Created(body) => {
                    let parsed: Value = serde_json::from_str(body)
                        .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
                    Ok(ProviderOrder {
                        uuid: parsed["uuid"].as_str().unwrap_or_default().to_string(),
                        raw_body: body.as_bytes().to_vec(),
                    })
                }
                Outcome::Status(status) => Err(RelayError::UpstreamStatus {
                    status,
                    body: "upstream said no".to_string(),
                }),
            }
        }

        fn verify_signature(&self, payload: &[u8], signature: &str) -> bool {
            self.verifier.verify(payload, signature)
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    fn setup_with(outcome: Outcome) -> (TestServer, AppState, Arc<FakeProvider>) {
        let provider = Arc::new(FakeProvider {
            verifier: SignatureVerifier::new(Some(SECRET.to_string())),
            outcome,
            requests: Mutex::new(Vec::new()),
        });
        let state = AppState::with_provider(provider.clone(), OrderTemplate::default());
        let server = TestServer::new(create_router(state.clone())).unwrap();
        (server, state, provider)
    }

    fn setup() -> (TestServer, AppState) {
        let (server, state, _) = setup_with(Outcome::Created(r#"{"uuid":"xyz"}"#));
        (server, state)
    }

    fn sign(body: &str) -> String {
        SignatureVerifier::new(Some(SECRET.to_string()))
            .sign(body.as_bytes())
            .unwrap()
    }

    fn signature_header(value: &str) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("x-signature"),
            HeaderValue::from_str(value).unwrap(),
        )
    }

    fn status_changed(uuid: &str, status: &str) -> String {
        json!({
            "event": "order.status.changed",
            "data": { "uuid": uuid, "status": status }
        })
        .to_string()
    }

    async fn post_webhook(server: &TestServer, body: &str, signature: &str) -> axum_test::TestResponse {
        let (name, value) = signature_header(signature);
        server
            .post("/webhook")
            .add_header(name, value)
            .bytes(Bytes::from(body.to_string()))
            .await
    }

    #[tokio::test]
    async fn test_webhook_records_status() {
        let (server, state) = setup();
        let body = status_changed("abc", "received");

        let response = post_webhook(&server, &body, &sign(&body)).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"status": "Webhook received successfully"})
        );
        assert_eq!(state.store.get("abc").await, Some(Order::new("abc", "received")));
    }

    #[tokio::test]
    async fn test_webhook_without_signature() {
        let (server, state) = setup();
        let body = status_changed("abc", "received");

        let response = server
            .post("/webhook")
            .bytes(Bytes::from(body))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Missing signature header");
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_webhook_with_empty_signature() {
        let (server, state) = setup();
        let body = status_changed("abc", "received");

        let response = post_webhook(&server, &body, "").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Missing signature header");
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_webhook_with_bad_signature() {
        let (server, state) = setup();
        let body = status_changed("abc", "received");
        let forged = sign(&status_changed("abc", "failed"));

        let response = post_webhook(&server, &body, &forged).await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.text(), "Invalid signature");
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_webhook_with_invalid_json() {
        let (server, state) = setup();
        let body = "{not json";

        let response = post_webhook(&server, body, &sign(body)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Invalid JSON format");
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_webhook_with_malformed_status_change() {
        let (server, state) = setup();
        let body = json!({ "event": "order.status.changed", "data": { "uuid": "abc" } }).to_string();

        let response = post_webhook(&server, &body, &sign(&body)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_webhook_other_event_is_acknowledged() {
        let (server, state) = setup();
        let body = json!({ "event": "order.created", "data": { "uuid": "abc" } }).to_string();

        let response = post_webhook(&server, &body, &sign(&body)).await;

        response.assert_status_ok();
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_order_tracks_and_passes_body_through() {
        let body = r#"{"uuid":"xyz","amount":0.8,"currency":"TON"}"#;
        let (server, state, provider) = setup_with(Outcome::Created(body));

        let response = server
            .post("/create")
            .form(&[("telegram_id", "123456789")])
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), body);
        assert_eq!(
            response.header("content-type"),
            HeaderValue::from_static("application/json")
        );
        assert_eq!(state.store.get("xyz").await, Some(Order::created("xyz")));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].telegram_id.as_deref(), Some("123456789"));
        assert!(requests[0].order_id.starts_with("INV-"));
    }

    #[tokio::test]
    async fn test_create_order_reads_json_and_query() {
        let (server, _state, provider) = setup_with(Outcome::Created(r#"{"uuid":"xyz"}"#));

        server
            .post("/create")
            .json(&json!({ "telegram_id": "from-json" }))
            .await
            .assert_status_ok();
        server
            .post("/create?telegram_id=from-query")
            .await
            .assert_status_ok();
        server.post("/create").await.assert_status_ok();

        let requests = provider.requests.lock().unwrap();
        let ids: Vec<_> = requests.iter().map(|r| r.telegram_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("from-json"), Some("from-query"), None]);
    }

    #[tokio::test]
    async fn test_create_order_mirrors_upstream_status() {
        let (server, state, _) = setup_with(Outcome::Status(402));

        let response = server.post("/create").await;

        response.assert_status(StatusCode::PAYMENT_REQUIRED);
        assert_eq!(response.text(), "Failed to create order");
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_snapshot_returns_last_status_per_order() {
        let (server, _state) = setup();

        for (uuid, status) in [("a", "created"), ("b", "created"), ("a", "received"), ("c", "failed")] {
            let body = status_changed(uuid, status);
            post_webhook(&server, &body, &sign(&body)).await.assert_status_ok();
        }

        let snapshot = server.get("/").await.json::<Value>();

        assert_eq!(
            snapshot,
            json!({
                "a": { "uuid": "a", "status": "received" },
                "b": { "uuid": "b", "status": "created" },
                "c": { "uuid": "c", "status": "failed" }
            })
        );
    }

    #[tokio::test]
    async fn test_get_order() {
        let (server, state) = setup();
        state.store.set(Order::created("abc")).await;

        let response = server.get("/orders/abc").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Order>(), Order::created("abc"));

        let response = server.get("/orders/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Order not found: nope");
    }

    #[tokio::test]
    async fn test_health() {
        let (server, _state) = setup();

        let body = server.get("/health").await.json::<Value>();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "arc-relay");
    }
}
