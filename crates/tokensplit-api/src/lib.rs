pub mod bootstrap;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

pub use error::{ApiError, ApiResult};
pub use middleware::{CORRELATION_ID_HEADER, RequestContext, correlation_id_middleware};
pub use state::AppState;
pub use telemetry::{
    HttpTelemetrySink, NoopTelemetrySink, TelemetryEvent, TelemetrySink, TelemetrySinkRef,
    TracingTelemetrySink,
};
