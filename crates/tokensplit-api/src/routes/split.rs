//! Text splitting route
//!
//! - `POST /Gpt2Splitter` (alias `POST /text/split`) packs a document's
//!   sentences into chunks of at most `max_length` tokens
//!
//! ```json
//! {"text": "First sentence. Second one.", "max_length": 256}
//! ```
//!
//! Response:
//! ```json
//! {"split_text": ["..."], "split_tokens": [42]}
//! ```

use super::response::{JsonUtf8, parse_json_body};
use crate::middleware::RequestContext;
use crate::telemetry::TelemetryEvent;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    Router,
    body::Bytes,
    extract::{Extension, State},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tokensplit_common::CorrelationId;
use tokensplit_splitting::{SplitRequest, SplitResult};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// Request payload for text splitting.
///
/// `text` may also be a number or boolean, `max_length` a float (truncated)
/// or a string holding an integer. `max_length` is capped by
/// `splitter.max_length_limit`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SplitTextRequest {
    /// Document to split
    pub text: String,
    /// Token budget per chunk, at least 1 and at most the configured limit
    pub max_length: usize,
}

/// Chunk texts and their token counts, index-aligned
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SplitTextResponse {
    pub split_text: Vec<String>,
    pub split_tokens: Vec<usize>,
}

impl From<SplitResult> for SplitTextResponse {
    fn from(result: SplitResult) -> Self {
        Self {
            split_text: result.split_text,
            split_tokens: result.split_tokens,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Gpt2Splitter", post(split_text_handler))
        .route("/text/split", post(split_text_handler))
}

/// Split a document into token-budgeted chunks of whole sentences.
///
/// A thin final chunk is padded with earlier sentences, so chunk texts may
/// repeat material.
#[utoipa::path(
    post,
    path = "/Gpt2Splitter",
    tag = "split",
    request_body = SplitTextRequest,
    responses(
        (status = 200, description = "Chunks and their token counts", body = SplitTextResponse),
        (status = 400, description = "Malformed body, missing or invalid fields, budget out of range", body = String, content_type = "text/plain"),
        (status = 500, description = "Splitting failed", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state, context, body), fields(correlation_id))]
pub async fn split_text_handler(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    body: Bytes,
) -> ApiResult<JsonUtf8<SplitTextResponse>> {
    let correlation_id = context
        .as_ref()
        .map_or_else(CorrelationId::new, |ctx| ctx.correlation_id.clone());

    tracing::Span::current().record("correlation_id", correlation_id.to_string());

    let input = parse_json_body(&body, &correlation_id)?;
    let SplitRequest { text, max_length } =
        SplitRequest::from_json(&input, state.splitter.max_length_limit)
            .map_err(|e| ApiError::from_split_error(&e, correlation_id.clone()))?;

    // Segmentation and BPE encoding are CPU-bound; keep them off the async workers
    let service = state.chunking_service(max_length);
    let (text, result) = tokio::task::spawn_blocking(move || {
        let result = service.split_text(&text);
        (text, result)
    })
    .await
    .map_err(|e| {
        error!(correlation_id = %correlation_id, error = %e, "Split task failed");
        ApiError::InternalServerError {
            correlation_id: correlation_id.clone(),
        }
    })?;

    info!(
        correlation_id = %correlation_id,
        max_length,
        text_chars = text.chars().count(),
        chunks = result.split_text.len(),
        "Split text"
    );

    state.telemetry.emit(TelemetryEvent::tokenize_text(
        &text,
        max_length,
        state.splitter.preview_chars,
        correlation_id,
    ));

    Ok(JsonUtf8(SplitTextResponse::from(result)))
}
