//! Shared response helpers

use crate::{ApiError, ApiResult};
use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tokensplit_common::CorrelationId;
use tracing::error;

/// Content type of every success body
pub const JSON_UTF8: &str = "application/json;charset=utf-8";

/// JSON body served as `application/json;charset=utf-8`
#[derive(Debug)]
pub struct JsonUtf8<T>(pub T);

impl<T: Serialize> IntoResponse for JsonUtf8<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                ApiError::InternalServerError {
                    correlation_id: CorrelationId::new(),
                }
                .into_response()
            }
        }
    }
}

/// Parse a raw request body as JSON.
///
/// Bodies are read as bytes so that malformed JSON gets the same plain-text
/// error format as validation failures, regardless of content type.
///
/// # Errors
///
/// Returns `MalformedJson` when the body is not valid JSON
pub fn parse_json_body(body: &[u8], correlation_id: &CorrelationId) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedJson {
        message: format!("Invalid JSON body: {e}"),
        correlation_id: correlation_id.clone(),
    })
}
