pub mod health;
pub mod response;
pub mod split;
pub mod tokens;

use crate::AppState;
use axum::{Router, extract::DefaultBodyLimit, middleware};

/// Build the service router.
///
/// Operation routes are served both at the root and under `/api`.
pub fn create_router(state: AppState, enable_docs: bool, body_limit_bytes: usize) -> Router {
    let operations: Router = Router::new()
        .merge(tokens::routes())
        .merge(split::routes())
        .with_state(state.clone());

    let mut router = Router::new()
        .merge(health::routes().with_state(state))
        .merge(operations.clone())
        .nest("/api", operations);

    if enable_docs {
        router = router.merge(crate::openapi::swagger_ui()); // Swagger UI + OpenAPI JSON
    }

    router
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        // Add correlation ID middleware to all routes
        .layer(middleware::from_fn(
            crate::middleware::correlation_id_middleware,
        ))
}
