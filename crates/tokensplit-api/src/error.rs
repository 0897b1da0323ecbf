//! HTTP error mapping for the tokensplit API.
//!
//! Success bodies are JSON, error bodies are plain descriptive text. Every
//! error carries the request's correlation ID, both in the log line and in the
//! `X-Correlation-ID` response header.
//!
//! # Status codes
//!
//! - `400` malformed JSON, wrong body shape for splitting, missing or
//!   uncoercible fields
//! - `422` wrong body shape or element type for token counting
//! - `500` encoder failures

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokensplit_common::CorrelationId;
use tokensplit_splitting::SplittingError;
use tracing::{error, warn};

/// API error types with correlation IDs for request tracking.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not valid JSON
    #[error("{message} (correlation: {correlation_id})")]
    MalformedJson {
        message: String,
        correlation_id: CorrelationId,
    },

    /// Request failed validation and is reported as `400`.
    ///
    /// Split requests with the wrong shape, missing fields or values that
    /// cannot be coerced.
    #[error("{message} (correlation: {correlation_id})")]
    InvalidRequest {
        message: String,
        correlation_id: CorrelationId,
    },

    /// Request failed validation and is reported as `422`.
    ///
    /// Token counting input that is not an array of strings.
    #[error("{message} (correlation: {correlation_id})")]
    UnprocessableInput {
        message: String,
        correlation_id: CorrelationId,
    },

    /// Internal server error with correlation ID.
    ///
    /// The encoder failed; nothing the caller can fix.
    #[error("Internal server error (correlation: {correlation_id})")]
    InternalServerError { correlation_id: CorrelationId },
}

impl ApiError {
    /// Map a token counting failure
    pub fn from_count_error(error: &SplittingError, correlation_id: CorrelationId) -> Self {
        if error.is_client_error() {
            Self::UnprocessableInput {
                message: error.to_string(),
                correlation_id,
            }
        } else {
            Self::internal(error, correlation_id)
        }
    }

    /// Map a text splitting failure
    pub fn from_split_error(error: &SplittingError, correlation_id: CorrelationId) -> Self {
        if error.is_client_error() {
            Self::InvalidRequest {
                message: error.to_string(),
                correlation_id,
            }
        } else {
            Self::internal(error, correlation_id)
        }
    }

    fn internal(error: &SplittingError, correlation_id: CorrelationId) -> Self {
        error!(correlation_id = %correlation_id, error = %error, "Encoder failure");
        Self::InternalServerError { correlation_id }
    }

    /// Get the correlation ID from any error variant.
    pub const fn correlation_id(&self) -> &CorrelationId {
        match self {
            Self::MalformedJson { correlation_id, .. }
            | Self::InvalidRequest { correlation_id, .. }
            | Self::UnprocessableInput { correlation_id, .. }
            | Self::InternalServerError { correlation_id } => correlation_id,
        }
    }

    /// Get the HTTP status code for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedJson { .. } | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UnprocessableInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The plain-text body sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::MalformedJson { message, .. }
            | Self::InvalidRequest { message, .. }
            | Self::UnprocessableInput { message, .. } => message.clone(),
            Self::InternalServerError { .. } => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let correlation_id = self.correlation_id();

        if status.is_server_error() {
            error!(correlation_id = %correlation_id, error = %self, "Server error");
        } else {
            warn!(correlation_id = %correlation_id, error = %self, "Client error");
        }

        let headers = [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )];
        let mut response = (status, headers, self.message()).into_response();

        // Add correlation ID to response headers for client tracking
        if let Ok(header_value) = correlation_id.to_string().parse::<HeaderValue>() {
            response
                .headers_mut()
                .insert(CORRELATION_ID_HEADER, header_value);
        }

        response
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
