//! `OpenAPI` documentation generation and Swagger UI setup

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// `OpenAPI` documentation for the tokensplit API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::tokens::count_tokens_handler,
        crate::routes::split::split_text_handler,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            crate::routes::split::SplitTextRequest,
            crate::routes::split::SplitTextResponse,
            crate::routes::health::HealthResponse,
        )
    ),
    tags(
        (name = "tokens", description = "BPE token counting"),
        (name = "split", description = "Sentence-preserving text splitting"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Tokensplit API",
        version = "0.2.0",
        description = "BPE token counting and token-budgeted text splitting",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:7071", description = "Local development server"),
        (url = "http://localhost:7071/api", description = "Local development server, prefixed routes")
    )
)]
pub struct ApiDoc;

/// Returns configured Swagger UI service
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
