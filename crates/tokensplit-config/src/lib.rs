//! Centralized configuration management for tokensplit
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Optional TOML file
//! 3. Environment variable overrides (`TOKENSPLIT_*`)
//! 4. Runtime validation

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use source::{ConfigurationLoader, ConfigurationSource, EnvironmentSource, TomlFileSource};
pub use validation::Validate;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// SAFE DEFAULTS
// =============================================================================

// Encoder Configuration
const DEFAULT_ENCODING: &str = "cl100k_base";

/// BPE vocabularies the encoder can load
pub const SUPPORTED_ENCODINGS: &[&str] = &[
    "cl100k_base",
    "o200k_base",
    "p50k_base",
    "p50k_edit",
    "r50k_base",
];

// Splitter Configuration
/// Share of the budget at or below which a trailing chunk is backfilled
pub const DEFAULT_THIN_CHUNK_RATIO: f64 = 0.8;
/// Largest `max_length` a split request may ask for
pub const DEFAULT_MAX_LENGTH_LIMIT: usize = 1_000_000;
const DEFAULT_PREVIEW_CHARS: usize = 252; // Telemetry text preview length

// API Server Configuration
const DEFAULT_API_HOST: &str = "127.0.0.1"; // Localhost only for security
const DEFAULT_API_PORT: u16 = 7071;
const DEFAULT_API_BODY_LIMIT_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_API_ENABLE_DOCS: bool = true;

// Telemetry Configuration
const DEFAULT_TELEMETRY_ENABLED: bool = true;
const DEFAULT_TELEMETRY_SERVICE_NAME: &str = "tokensplit";
const DEFAULT_TRACING_LEVEL: &str = "info";
const DEFAULT_LOG_FORMAT: &str = "pretty";

const TRACING_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "text", "plain", "json"];

/// Read an environment variable and parse it, keeping `fallback` when unset or unparsable
fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback)
}

/// Core configuration for the entire tokensplit application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// BPE encoder configuration
    pub encoder: EncoderConfig,

    /// Sentence packing configuration
    pub splitter: SplitterConfig,

    /// API server configuration
    pub api: ApiConfig,

    /// Telemetry and logging configuration
    pub telemetry: TelemetryConfig,
}

/// Which BPE vocabulary to load at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Encoding name, e.g. `cl100k_base`
    pub encoding: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Apply `TOKENSPLIT_ENCODER_*` overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            encoding: env_or("TOKENSPLIT_ENCODER_ENCODING", self.encoding),
        }
    }
}

impl Validate for EncoderConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_one_of(&self.encoding, SUPPORTED_ENCODINGS, "encoder.encoding")
    }
}

/// Chunk packing and request preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Share of `max_length` at or below which the trailing chunk is backfilled
    pub thin_chunk_ratio: f64,

    /// Upper bound on a request's `max_length`; wrap-around output grows with it
    pub max_length_limit: usize,

    /// Number of characters of the input kept in telemetry previews
    pub preview_chars: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            thin_chunk_ratio: DEFAULT_THIN_CHUNK_RATIO,
            max_length_limit: DEFAULT_MAX_LENGTH_LIMIT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl SplitterConfig {
    /// Apply `TOKENSPLIT_SPLITTER_*` overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            thin_chunk_ratio: env_or("TOKENSPLIT_SPLITTER_THIN_CHUNK_RATIO", self.thin_chunk_ratio),
            max_length_limit: env_or("TOKENSPLIT_SPLITTER_MAX_LENGTH_LIMIT", self.max_length_limit),
            preview_chars: env_or("TOKENSPLIT_SPLITTER_PREVIEW_CHARS", self.preview_chars),
        }
    }
}

impl Validate for SplitterConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.thin_chunk_ratio.is_finite() || self.thin_chunk_ratio < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "splitter.thin_chunk_ratio".to_string(),
                message: format!("{} is not a finite, non-negative ratio", self.thin_chunk_ratio),
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ratio_scaled = (self.thin_chunk_ratio * 1000.0) as u64;
        validation::validate_range(ratio_scaled, 0, 1000, "splitter.thin_chunk_ratio")?;
        validation::validate_range(
            self.max_length_limit as u64,
            1,
            100_000_000,
            "splitter.max_length_limit",
        )?;
        validation::validate_range(
            self.preview_chars as u64,
            1,
            1_000_000,
            "splitter.preview_chars",
        )
    }
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Largest accepted request body in bytes
    pub request_body_limit_bytes: u64,

    /// Enable OpenAPI/Swagger documentation
    pub enable_docs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
            request_body_limit_bytes: DEFAULT_API_BODY_LIMIT_BYTES,
            enable_docs: DEFAULT_API_ENABLE_DOCS,
        }
    }
}

impl ApiConfig {
    /// Apply `TOKENSPLIT_API_*` overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            host: env_or("TOKENSPLIT_API_HOST", self.host),
            port: env_or("TOKENSPLIT_API_PORT", self.port),
            request_body_limit_bytes: env_or(
                "TOKENSPLIT_API_REQUEST_BODY_LIMIT_BYTES",
                self.request_body_limit_bytes,
            ),
            enable_docs: env_or("TOKENSPLIT_API_ENABLE_DOCS", self.enable_docs),
        }
    }

    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.host, "api.host")?;
        validation::validate_port(self.port)?;
        validation::validate_range(
            self.request_body_limit_bytes,
            1024,
            1024 * 1024 * 1024,
            "api.request_body_limit_bytes",
        )
    }
}

/// Telemetry and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Emit a telemetry event per split request
    pub enabled: bool,

    /// HTTP collector receiving events; events go to the log when unset
    pub endpoint: Option<String>,

    /// Service name attached to every event
    pub service_name: String,

    /// Tracing level (trace, debug, info, warn, error)
    pub tracing_level: String,

    /// Log line format (pretty or json)
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_TELEMETRY_ENABLED,
            endpoint: None,
            service_name: DEFAULT_TELEMETRY_SERVICE_NAME.to_string(),
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Apply `TOKENSPLIT_TELEMETRY_*` overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            enabled: env_or("TOKENSPLIT_TELEMETRY_ENABLED", self.enabled),
            endpoint: std::env::var("TOKENSPLIT_TELEMETRY_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty())
                .or(self.endpoint),
            service_name: env_or("TOKENSPLIT_TELEMETRY_SERVICE_NAME", self.service_name),
            tracing_level: env_or("TOKENSPLIT_TELEMETRY_TRACING_LEVEL", self.tracing_level),
            log_format: env_or("TOKENSPLIT_LOG_FORMAT", self.log_format),
        }
    }
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.service_name, "telemetry.service_name")?;

        if let Some(ref endpoint) = self.endpoint {
            validation::validate_url(endpoint, "telemetry.endpoint")?;
        }

        validation::validate_one_of(&self.tracing_level, TRACING_LEVELS, "telemetry.tracing_level")?;
        validation::validate_one_of(&self.log_format, LOG_FORMATS, "telemetry.log_format")
    }
}

impl ApplicationConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply every `TOKENSPLIT_*` override on top of this configuration
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            encoder: self.encoder.with_env_overrides(),
            splitter: self.splitter.with_env_overrides(),
            api: self.api.with_env_overrides(),
            telemetry: self.telemetry.with_env_overrides(),
        }
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.encoder.validate()?;
        self.splitter.validate()?;
        self.api.validate()?;
        self.telemetry.validate()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_uses_safe_defaults() {
        let config = ApplicationConfig::default();

        assert_eq!(config.encoder.encoding, "cl100k_base");
        assert!((config.splitter.thin_chunk_ratio - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.splitter.max_length_limit, 1_000_000);
        assert_eq!(config.splitter.preview_chars, 252);
        assert_eq!(config.api.host, "127.0.0.1");
        assert!(config.telemetry.enabled);
        assert!(config.telemetry.endpoint.is_none());
    }

    #[test]
    fn test_environment_variable_overrides() {
        unsafe {
            std::env::set_var("TOKENSPLIT_SPLITTER_PREVIEW_CHARS", "64");
            std::env::set_var("TOKENSPLIT_API_ENABLE_DOCS", "false");
        }

        let config = ApplicationConfig::from_env();

        assert_eq!(config.splitter.preview_chars, 64);
        assert!(!config.api.enable_docs);

        unsafe {
            std::env::remove_var("TOKENSPLIT_SPLITTER_PREVIEW_CHARS");
            std::env::remove_var("TOKENSPLIT_API_ENABLE_DOCS");
        }
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let mut config = ApplicationConfig::default();
        config.encoder.encoding = "gpt2_whatever".to_string();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("encoder.encoding"));
    }

    #[test]
    fn test_thin_chunk_ratio_bounds() {
        let mut config = ApplicationConfig::default();

        config.splitter.thin_chunk_ratio = 1.5;
        assert!(config.validate().is_err());

        config.splitter.thin_chunk_ratio = -0.1;
        assert!(config.validate().is_err());

        config.splitter.thin_chunk_ratio = f64::NAN;
        assert!(config.validate().is_err());

        config.splitter.thin_chunk_ratio = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_length_limit_bounds() {
        let mut config = ApplicationConfig::default();

        config.splitter.max_length_limit = 0;
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("splitter.max_length_limit"));

        config.splitter.max_length_limit = 100_000_001;
        assert!(config.validate().is_err());

        config.splitter.max_length_limit = 4096;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_telemetry_endpoint_must_be_url() {
        let mut config = ApplicationConfig::default();
        config.telemetry.endpoint = Some("collector:4318".to_string());
        assert!(config.validate().is_err());

        config.telemetry.endpoint = Some("http://collector:4318/events".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_tracing_level_is_rejected() {
        let mut config = ApplicationConfig::default();
        config.telemetry.tracing_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_can_be_serialized_to_toml() {
        let config = ApplicationConfig::default();
        let toml_string = toml::to_string(&config).expect("Config should serialize to TOML");

        assert!(toml_string.contains("[encoder]"));
        assert!(toml_string.contains("[splitter]"));

        let parsed: ApplicationConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.api.port, config.api.port);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: ApplicationConfig = toml::from_str("[api]\nport = 9000\n").unwrap();

        assert_eq!(parsed.api.port, 9000);
        assert_eq!(parsed.api.host, "127.0.0.1");
        assert_eq!(parsed.encoder.encoding, "cl100k_base");
    }
}
