//! Unit test utilities

use crate::AppState;
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use std::sync::{Arc, Mutex};
use tokensplit_config::SplitterConfig;
use tokensplit_splitting::TokenCounter;

/// Standard test result type for all test functions
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// One token per whitespace-separated word
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn name(&self) -> &'static str {
        "words"
    }

    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Keeps every emitted event for inspection
#[derive(Default)]
pub struct RecordingTelemetrySink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetrySink {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TelemetrySink for RecordingTelemetrySink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn emit(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// State backed by the word counter and a recording sink
pub fn mock_app_state() -> (AppState, Arc<RecordingTelemetrySink>) {
    let sink = Arc::new(RecordingTelemetrySink::default());
    let state = AppState::new(
        Arc::new(WordCounter),
        Arc::clone(&sink) as Arc<dyn TelemetrySink>,
        SplitterConfig::default(),
    );
    (state, sink)
}
