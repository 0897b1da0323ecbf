//! Request correlation middleware

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tokensplit_common::CorrelationId;
use tracing::{Instrument, info_span};

/// Header used to pass correlation IDs in and out
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Per-request context inserted into request extensions
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: CorrelationId,
}

/// Tag every request with a correlation ID.
///
/// An incoming `X-Correlation-ID` holding a UUID is reused, anything else gets
/// a fresh one. The ID is echoed on the response unless the handler already
/// set it.
pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(CorrelationId::new, CorrelationId::from);

    request.extensions_mut().insert(RequestContext {
        correlation_id: correlation_id.clone(),
    });

    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if !response.headers().contains_key(CORRELATION_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
            response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        }
    }

    response
}
