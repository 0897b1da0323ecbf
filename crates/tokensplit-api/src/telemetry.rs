//! Best-effort telemetry for split requests
//!
//! Sinks never block the request and never fail it: delivery errors are
//! logged and dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokensplit_common::CorrelationId;
use tracing::{debug, error, info, warn};

/// Event name emitted once per split request
pub const TOKENIZE_TEXT_EVENT: &str = "TokenizeText";

const ELLIPSIS: &str = "...";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// A named event with string properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub correlation_id: CorrelationId,
    pub timestamp: DateTime<Utc>,
    pub properties: BTreeMap<String, String>,
}

impl TelemetryEvent {
    /// Event describing one split request: a preview of the input text and
    /// the requested budget
    pub fn tokenize_text(
        text: &str,
        max_length: usize,
        preview_chars: usize,
        correlation_id: CorrelationId,
    ) -> Self {
        let properties = BTreeMap::from([
            ("FullText".to_string(), text_preview(text, preview_chars)),
            ("MaxLength".to_string(), max_length.to_string()),
        ]);

        Self {
            name: TOKENIZE_TEXT_EVENT.to_string(),
            correlation_id,
            timestamp: Utc::now(),
            properties,
        }
    }
}

/// First `limit` characters of `text`, with `...` appended when truncated
pub fn text_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => {
            let head = text.get(..cut).unwrap_or(text);
            format!("{head}{ELLIPSIS}")
        }
        None => text.to_string(),
    }
}

/// Destination for telemetry events
pub trait TelemetrySink: Send + Sync {
    fn name(&self) -> &str;

    /// Hand off an event. Must return immediately and never fail.
    fn emit(&self, event: TelemetryEvent);
}

/// Shared telemetry sink handle
pub type TelemetrySinkRef = Arc<dyn TelemetrySink>;

/// Drops every event
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn emit(&self, event: TelemetryEvent) {
        debug!(event = %event.name, "Telemetry disabled, dropping event");
    }
}

/// Writes events to the log as structured `tracing` events
pub struct TracingTelemetrySink {
    service_name: String,
}

impl TracingTelemetrySink {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl TelemetrySink for TracingTelemetrySink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn emit(&self, event: TelemetryEvent) {
        info!(
            target: "tokensplit::telemetry",
            service = %self.service_name,
            event = %event.name,
            correlation_id = %event.correlation_id,
            properties = ?event.properties,
            "Telemetry event"
        );
    }
}

/// Body posted to the HTTP collector
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    service: &'a str,
    #[serde(flatten)]
    event: &'a TelemetryEvent,
}

/// Posts events as JSON to a collector endpoint from a spawned task
#[derive(Clone)]
pub struct HttpTelemetrySink {
    client: reqwest::Client,
    endpoint: String,
    service_name: String,
}

impl HttpTelemetrySink {
    /// Create a sink posting to `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        endpoint: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            service_name: service_name.into(),
        })
    }

    /// Deliver one event and wait for the collector's answer
    ///
    /// # Errors
    ///
    /// Returns transport errors and non-success HTTP statuses
    pub async fn send(&self, event: &TelemetryEvent) -> Result<(), reqwest::Error> {
        let envelope = Envelope {
            service: &self.service_name,
            event,
        };

        self.client
            .post(&self.endpoint)
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

impl TelemetrySink for HttpTelemetrySink {
    fn name(&self) -> &'static str {
        "http"
    }

    fn emit(&self, event: TelemetryEvent) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(event = %event.name, "No async runtime, dropping telemetry event");
            return;
        };

        let sink = self.clone();
        runtime.spawn(async move {
            if let Err(e) = sink.send(&event).await {
                error!(
                    correlation_id = %event.correlation_id,
                    endpoint = %sink.endpoint,
                    error = %e,
                    "Failed to deliver telemetry event"
                );
            }
        });
    }
}
