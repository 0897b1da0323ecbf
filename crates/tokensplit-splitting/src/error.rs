//! Error types for the splitting crate
//!
//! Every variant except `Encoder` is a client-caused validation failure: it is
//! returned before any work is done and never accompanies partial results.

use crate::json::JsonKind;
use thiserror::Error;

/// Splitting-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplittingError {
    /// Top-level JSON value has the wrong shape
    #[error("Expecting {expected}, got {actual}")]
    InputType {
        expected: &'static str,
        actual: JsonKind,
    },

    /// An array element is not a string
    #[error("Expecting array of strings, got {actual}")]
    ElementType { index: usize, actual: JsonKind },

    /// Required object fields are absent, in check order
    #[error(
        "Missing required {} in body: {}",
        property_noun(.fields.len()),
        .fields.join(", ")
    )]
    MissingField { fields: Vec<&'static str> },

    /// A field is present but cannot be coerced to the expected type
    #[error("Invalid value for '{field}': expected {expected}, got {actual}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Token budget below one
    #[error("max_length must be a positive integer, got {0}")]
    InvalidMaxLength(i64),

    /// Token budget above the configured limit
    #[error("max_length must be at most {limit}, got {value}")]
    MaxLengthTooLarge { value: usize, limit: usize },

    /// Unknown BPE vocabulary name
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Vocabulary failed to load
    #[error("Token encoder error: {0}")]
    Encoder(String),
}

const fn property_noun(count: usize) -> &'static str {
    if count == 1 { "property" } else { "properties" }
}

impl SplittingError {
    /// Whether the caller sent bad input (as opposed to a server-side failure)
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encoder(_) | Self::UnsupportedEncoding(_))
    }
}

impl From<anyhow::Error> for SplittingError {
    fn from(e: anyhow::Error) -> Self {
        Self::Encoder(e.to_string())
    }
}

/// Result type alias for splitting operations
pub type SplittingResult<T> = Result<T, SplittingError>;
