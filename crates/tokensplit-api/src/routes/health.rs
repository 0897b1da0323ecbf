use crate::AppState;
use crate::middleware::RequestContext;
use axum::{Extension, Json, Router, extract::State, routing::get};
use serde::Serialize;
use tokensplit_common::CorrelationId;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Health check payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Name of the loaded BPE vocabulary
    pub encoding: String,
    pub correlation_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint with correlation ID tracking
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(state, context), fields(correlation_id))]
pub async fn health_check(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
) -> Json<HealthResponse> {
    let correlation_id = context
        .as_ref()
        .map_or_else(CorrelationId::new, |ctx| ctx.correlation_id.clone());

    tracing::Span::current().record("correlation_id", correlation_id.to_string());

    info!(correlation_id = %correlation_id, "Health check request");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "tokensplit-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        encoding: state.counter.name().to_string(),
        correlation_id: correlation_id.to_string(),
    })
}
