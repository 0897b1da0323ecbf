//! Batch token counting over a JSON array of strings

use crate::chunking::TokenCounter;
use crate::json::JsonKind;
use crate::{SplittingError, SplittingResult};
use serde_json::Value;

/// Count tokens for every string in a JSON array, preserving order.
///
/// All elements are validated before any counting happens, so a bad element
/// anywhere yields an error and no partial counts.
///
/// # Errors
///
/// Returns `InputType` when `input` is not an array and `ElementType` for the
/// first element that is not a string
pub fn count_tokens(counter: &dyn TokenCounter, input: &Value) -> SplittingResult<Vec<usize>> {
    let Value::Array(items) = input else {
        return Err(SplittingError::InputType {
            expected: "array",
            actual: JsonKind::of(input),
        });
    };

    let texts = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str().ok_or(SplittingError::ElementType {
                index,
                actual: JsonKind::of(item),
            })
        })
        .collect::<SplittingResult<Vec<&str>>>()?;

    Ok(counter.count_batch(&texts))
}
