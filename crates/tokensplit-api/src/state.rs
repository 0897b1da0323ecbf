//! Application state for Axum handlers
//!
//! Holds the loaded vocabulary and the telemetry sink. Built once at startup
//! and shared read-only by every handler.

use crate::telemetry::TelemetrySinkRef;
use std::sync::Arc;
use tokensplit_config::SplitterConfig;
use tokensplit_splitting::{ChunkingService, TokenBudget, TokenCounterRef};

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// BPE token counter, immutable after load
    pub counter: TokenCounterRef,
    /// Destination for per-request telemetry
    pub telemetry: TelemetrySinkRef,
    /// Packing and preview settings
    pub splitter: SplitterConfig,
}

impl AppState {
    #[must_use]
    pub const fn new(
        counter: TokenCounterRef,
        telemetry: TelemetrySinkRef,
        splitter: SplitterConfig,
    ) -> Self {
        Self {
            counter,
            telemetry,
            splitter,
        }
    }

    /// Chunking service for one request's budget
    pub fn chunking_service(&self, max_length: usize) -> ChunkingService {
        let budget = TokenBudget::new(max_length).with_thin_ratio(self.splitter.thin_chunk_ratio);
        ChunkingService::new(Arc::clone(&self.counter), budget)
    }
}
