//! Split request parsing and field coercion

use crate::json::JsonKind;
use crate::{SplittingError, SplittingResult};
use serde_json::Value;

/// A validated text splitting request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub text: String,
    pub max_length: usize,
}

impl SplitRequest {
    /// Validate and coerce a JSON request body.
    ///
    /// `text` accepts strings, numbers and booleans (rendered as JSON).
    /// `max_length` accepts integers, floats (truncated toward zero) and
    /// strings holding an integer, and must lie in `1..=max_length_limit`.
    ///
    /// # Errors
    ///
    /// `InputType` for a non-object body, `MissingField` listing every absent
    /// field, `InvalidField` for values that cannot be coerced,
    /// `InvalidMaxLength` for budgets below one and `MaxLengthTooLarge` for
    /// budgets above `max_length_limit`
    pub fn from_json(body: &Value, max_length_limit: usize) -> SplittingResult<Self> {
        let Value::Object(fields) = body else {
            return Err(SplittingError::InputType {
                expected: "object",
                actual: JsonKind::of(body),
            });
        };

        // Reported in this order when missing
        let max_length = fields.get("max_length");
        let text = fields.get("text");

        let (Some(max_length), Some(text)) = (max_length, text) else {
            let missing = [("max_length", max_length), ("text", text)]
                .into_iter()
                .filter(|(_, value)| JsonKind::of_field(*value) == JsonKind::Absent)
                .map(|(name, _)| name)
                .collect();
            return Err(SplittingError::MissingField { fields: missing });
        };

        let max_length = coerce_max_length(max_length, max_length_limit)?;
        let text = coerce_text(text)?;

        Ok(Self { text, max_length })
    }
}

/// Check a token budget against `1..=limit`
///
/// # Errors
///
/// `InvalidMaxLength` below one, `MaxLengthTooLarge` above `limit`
pub fn validate_max_length(max_length: i64, limit: usize) -> SplittingResult<usize> {
    let length = usize::try_from(max_length)
        .ok()
        .filter(|length| *length >= 1)
        .ok_or(SplittingError::InvalidMaxLength(max_length))?;

    if length > limit {
        return Err(SplittingError::MaxLengthTooLarge {
            value: length,
            limit,
        });
    }

    Ok(length)
}

/// Render a scalar as request text.
///
/// Booleans keep their JSON spelling (`true`, not `True`) and `null` is
/// rejected rather than turned into a placeholder word.
fn coerce_text(value: &Value) -> SplittingResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(invalid("text", "a string", other)),
    }
}

fn coerce_max_length(value: &Value, limit: usize) -> SplittingResult<usize> {
    let parsed = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_float)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    let max_length = parsed.ok_or_else(|| invalid("max_length", "an integer", value))?;
    validate_max_length(max_length, limit)
}

/// Truncate toward zero, refusing values that do not fit an `i64`
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate_float(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    let in_range = truncated >= i64::MIN as f64 && truncated < i64::MAX as f64;
    (truncated.is_finite() && in_range).then_some(truncated as i64)
}

fn invalid(field: &'static str, expected: &'static str, actual: &Value) -> SplittingError {
    SplittingError::InvalidField {
        field,
        expected,
        actual: JsonKind::of(actual).to_string(),
    }
}
