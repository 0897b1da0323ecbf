//! HTTP contract tests driving the router with `oneshot`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokensplit_api::{
    AppState, CORRELATION_ID_HEADER, TelemetryEvent, TelemetrySink, routes::create_router,
};
use tokensplit_config::SplitterConfig;
use tokensplit_splitting::TiktokenCounter;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl TelemetrySink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn emit(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn app_with_sink() -> (Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let counter = TiktokenCounter::cl100k().expect("cl100k vocabulary should load");
    let state = AppState::new(
        Arc::new(counter),
        Arc::clone(&sink) as Arc<dyn TelemetrySink>,
        SplitterConfig::default(),
    );
    (create_router(state, true, 1024 * 1024), sink)
}

fn app() -> Router {
    app_with_sink().0
}

async fn post(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_count_tokens_returns_counts_in_order() {
    let response = post(app(), "/CalculateTokens", r#"["Hello, world!", ""]"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json;charset=utf-8"
    );
    assert_eq!(body_json(response).await, json!([4, 0]));
}

#[tokio::test]
async fn test_count_tokens_empty_array() {
    let response = post(app(), "/tokens/count", "[]").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_count_tokens_rejects_non_array() {
    let response = post(app(), "/CalculateTokens", r#"{"text": "hi"}"#).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    assert_eq!(body_text(response).await, "Expecting array, got object");
}

#[tokio::test]
async fn test_count_tokens_rejects_non_string_element() {
    let response = post(app(), "/CalculateTokens", r#"["ok", 3]"#).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_text(response).await,
        "Expecting array of strings, got number"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let response = post(app(), "/CalculateTokens", "[\"unterminated").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_split_missing_both_fields() {
    let response = post(app(), "/Gpt2Splitter", "{}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Missing required properties in body: max_length, text"
    );
}

#[tokio::test]
async fn test_split_missing_text() {
    let response = post(app(), "/Gpt2Splitter", r#"{"max_length": 10}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Missing required property in body: text"
    );
}

#[tokio::test]
async fn test_split_rejects_non_object() {
    let response = post(app(), "/Gpt2Splitter", r#"["text"]"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Expecting object, got array");
}

#[tokio::test]
async fn test_split_rejects_zero_budget() {
    let response = post(app(), "/Gpt2Splitter", r#"{"text": "Hi.", "max_length": 0}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_split_rejects_budget_above_limit() {
    let (app, sink) = app_with_sink();

    let response = post(app, "/Gpt2Splitter", r#"{"text": "Hi.", "max_length": 4000000}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "max_length must be at most 1000000, got 4000000"
    );
    assert!(sink.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_split_rejects_huge_float_budget() {
    let response = post(app(), "/Gpt2Splitter", r#"{"text": "Hi.", "max_length": 1e30}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid value for 'max_length': expected an integer, got number"
    );
}

#[tokio::test]
async fn test_split_honors_configured_limit() {
    let counter = TiktokenCounter::cl100k().expect("cl100k vocabulary should load");
    let splitter = SplitterConfig {
        max_length_limit: 16,
        ..SplitterConfig::default()
    };
    let state = AppState::new(Arc::new(counter), Arc::new(RecordingSink::default()), splitter);

    let accepted = post(
        create_router(state.clone(), false, 1024),
        "/Gpt2Splitter",
        r#"{"text": "Hi.", "max_length": 16}"#,
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::OK);

    let rejected = post(
        create_router(state, false, 1024),
        "/Gpt2Splitter",
        r#"{"text": "Hi.", "max_length": 17}"#,
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_split_returns_parallel_arrays() {
    let body = json!({
        "text": "See art. 5 below. This is new. Another sentence follows here.",
        "max_length": "8"
    });
    let response = post(app(), "/api/text/split", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json;charset=utf-8"
    );

    let json = body_json(response).await;
    let texts = json["split_text"].as_array().unwrap();
    let tokens = json["split_tokens"].as_array().unwrap();
    assert_eq!(texts.len(), tokens.len());
    assert!(!texts.is_empty());
    assert_eq!(texts[0], "See art. 5 below.");
}

#[tokio::test]
async fn test_split_emits_telemetry_event() {
    let (app, sink) = app_with_sink();
    let text = "x".repeat(400);
    let body = json!({"text": text, "max_length": 50});

    let response = post(app, "/Gpt2Splitter", &body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let events = sink.events.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.name, "TokenizeText");
    assert_eq!(event.properties["MaxLength"], "50");
    assert_eq!(event.properties["FullText"].chars().count(), 255);
    assert!(event.properties["FullText"].ends_with("..."));
}

#[tokio::test]
async fn test_failed_split_emits_no_telemetry() {
    let (app, sink) = app_with_sink();

    let response = post(app, "/Gpt2Splitter", "{}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(sink.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_correlation_id_is_echoed() {
    let id = "0b3c6a52-8f0e-4d5b-a6f2-3e9d7c1b2a40";
    let request = Request::builder()
        .method("POST")
        .uri("/CalculateTokens")
        .header(CORRELATION_ID_HEADER, id)
        .body(Body::from("[\"a\"]"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers().get(CORRELATION_ID_HEADER).unwrap(), id);
}

#[tokio::test]
async fn test_health_reports_encoding() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["encoding"], "cl100k_base");
}

#[tokio::test]
async fn test_body_limit_is_enforced() {
    let counter = TiktokenCounter::cl100k().expect("cl100k vocabulary should load");
    let state = AppState::new(
        Arc::new(counter),
        Arc::new(RecordingSink::default()),
        SplitterConfig::default(),
    );
    let app = create_router(state, false, 16);

    let response = post(app, "/CalculateTokens", r#"["this body is longer than sixteen bytes"]"#).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
