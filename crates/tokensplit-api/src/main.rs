//! Tokensplit API Server
//!
//! HTTP API server for BPE token counting and token-budgeted text splitting.

use tokensplit_api::bootstrap;
use tracing::info;

type MainResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> MainResult {
    // Initialize environment (load .env, etc.)
    tokensplit_common::initialize_environment();

    let config = bootstrap::load_config(None)?;
    bootstrap::init_logging(&config.telemetry);

    info!("Starting tokensplit API server...");
    bootstrap::serve(&config).await
}
