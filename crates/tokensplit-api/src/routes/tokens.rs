//! Batch token counting route
//!
//! - `POST /CalculateTokens` (alias `POST /tokens/count`) takes a JSON array
//!   of strings and returns their token counts in the same order
//!
//! ```json
//! ["Hello, world!", ""]
//! ```
//!
//! Response:
//! ```json
//! [4, 0]
//! ```

use super::response::{JsonUtf8, parse_json_body};
use crate::middleware::RequestContext;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    Router,
    body::Bytes,
    extract::{Extension, State},
    routing::post,
};
use tokensplit_common::CorrelationId;
use tokensplit_splitting::count_tokens;
use tracing::{info, instrument};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/CalculateTokens", post(count_tokens_handler))
        .route("/tokens/count", post(count_tokens_handler))
}

/// Count BPE tokens for each string in the array.
#[utoipa::path(
    post,
    path = "/CalculateTokens",
    tag = "tokens",
    request_body(content = Vec<String>, description = "Texts to count"),
    responses(
        (status = 200, description = "Token count per input string, same order", body = Vec<usize>),
        (status = 400, description = "Body is not valid JSON", body = String, content_type = "text/plain"),
        (status = 422, description = "Body is not an array of strings", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state, context, body), fields(correlation_id))]
pub async fn count_tokens_handler(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    body: Bytes,
) -> ApiResult<JsonUtf8<Vec<usize>>> {
    let correlation_id = context
        .as_ref()
        .map_or_else(CorrelationId::new, |ctx| ctx.correlation_id.clone());

    tracing::Span::current().record("correlation_id", correlation_id.to_string());

    let input = parse_json_body(&body, &correlation_id)?;
    let counts = count_tokens(state.counter.as_ref(), &input)
        .map_err(|e| ApiError::from_count_error(&e, correlation_id.clone()))?;

    info!(
        correlation_id = %correlation_id,
        texts = counts.len(),
        total_tokens = counts.iter().sum::<usize>(),
        "Counted tokens"
    );

    Ok(JsonUtf8(counts))
}
