//! Application bootstrap and service initialization
//!
//! Loads configuration, installs logging, builds the shared services once and
//! runs the HTTP server. Shared by the `tokensplit-api` binary and the
//! `tokensplit serve` command.

use crate::AppState;
use crate::routes::create_router;
use crate::telemetry::{
    HttpTelemetrySink, NoopTelemetrySink, TelemetrySinkRef, TracingTelemetrySink,
};
use std::path::Path;
use std::sync::Arc;
use tokensplit_common::{LogFormat, init_tracing};
use tokensplit_config::{
    ApplicationConfig, ConfigurationLoader, EncoderConfig, TelemetryConfig,
};
use tokensplit_splitting::{TiktokenCounter, TokenCounterRef};
use tracing::info;

/// Bootstrap result type
pub type BootstrapResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load defaults, an optional TOML file and `TOKENSPLIT_*` overrides
///
/// # Errors
///
/// Returns error if the file cannot be read or the result fails validation
pub fn load_config(config_file: Option<&Path>) -> BootstrapResult<ApplicationConfig> {
    Ok(ConfigurationLoader::standard(config_file).load()?)
}

/// Install the tracing subscriber described by the telemetry section
pub fn init_logging(config: &TelemetryConfig) {
    let format = config.log_format.parse().unwrap_or(LogFormat::Pretty);
    init_tracing(&config.tracing_level, format);
}

/// Load the BPE vocabulary
///
/// # Errors
///
/// Returns error for unknown encodings or if the vocabulary fails to load
pub fn setup_token_counter(config: &EncoderConfig) -> BootstrapResult<TokenCounterRef> {
    info!(encoding = %config.encoding, "Loading BPE vocabulary...");
    let counter = Arc::new(TiktokenCounter::new(&config.encoding)?) as TokenCounterRef;
    Ok(counter)
}

/// Pick the telemetry sink: disabled, HTTP collector, or the log
///
/// # Errors
///
/// Returns error if the HTTP client cannot be built
pub fn setup_telemetry(config: &TelemetryConfig) -> BootstrapResult<TelemetrySinkRef> {
    let sink: TelemetrySinkRef = match (config.enabled, &config.endpoint) {
        (false, _) => Arc::new(NoopTelemetrySink),
        (true, Some(endpoint)) => Arc::new(HttpTelemetrySink::new(
            endpoint.clone(),
            config.service_name.clone(),
        )?),
        (true, None) => Arc::new(TracingTelemetrySink::new(config.service_name.clone())),
    };

    info!(sink = sink.name(), "Telemetry sink ready");
    Ok(sink)
}

/// Initialize all services and create application state
///
/// # Errors
///
/// Returns error if any service initialization fails
pub fn initialize_app_state(config: &ApplicationConfig) -> BootstrapResult<AppState> {
    let counter = setup_token_counter(&config.encoder)?;
    let telemetry = setup_telemetry(&config.telemetry)?;

    let state = AppState::new(counter, telemetry, config.splitter.clone());
    info!("Application state initialized successfully");
    Ok(state)
}

/// Run the HTTP server until Ctrl-C
///
/// # Errors
///
/// Returns error if startup fails or the listener cannot be bound
pub async fn serve(config: &ApplicationConfig) -> BootstrapResult<()> {
    let state = initialize_app_state(config)?;
    let body_limit = usize::try_from(config.api.request_body_limit_bytes).unwrap_or(usize::MAX);
    let app = create_router(state, config.api.enable_docs, body_limit);

    let addr = config.api.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, docs = config.api.enable_docs, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
