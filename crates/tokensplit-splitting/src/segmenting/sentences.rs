//! Sentence segmentation by punctuation and line breaks
//!
//! Three passes:
//! 1. break after a period followed by whitespace, unless the period closes a
//!    single-character initial (`A. Smith`, `J.R. Tolkien`)
//! 2. break each fragment on runs of line breaks, dropping empty pieces
//! 3. glue a fragment ending in a known abbreviation to the fragment after it

use regex::Regex;
use std::sync::LazyLock;

/// Abbreviations that end with a period but never end a sentence
pub const ABBREVIATIONS: &[&str] = &[
    "prot.",
    "os.",
    "prs.",
    "re.",
    "lett.",
    "abbr.",
    "cfr.",
    "art.",
    "ss.mm.ii.",
];

#[allow(clippy::expect_used)] // Constant pattern
static PERIOD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+").expect("period boundary pattern is valid"));

#[allow(clippy::expect_used)] // Constant pattern
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)+").expect("line break pattern is valid"));

/// Split text into ordered, non-empty sentences.
///
/// Sentence-ending periods stay attached to their sentence; the whitespace
/// after them is dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let fragments: Vec<&str> = period_fragments(text)
        .into_iter()
        .flat_map(|fragment| LINE_BREAKS.split(fragment))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    let sentences = merge_abbreviations(&fragments);
    tracing::debug!(
        fragments = fragments.len(),
        sentences = sentences.len(),
        "Segmented text"
    );
    sentences
}

/// Pass 1: cut after every period that is followed by whitespace and does
/// not close an initial
fn period_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for boundary in PERIOD_BOUNDARY.find_iter(text) {
        if closes_initial(text, boundary.start()) {
            continue;
        }

        // The period is one byte wide; keep it with the sentence
        let end = boundary.start().saturating_add(1);
        if let Some(fragment) = text.get(start..end) {
            fragments.push(fragment);
        }
        start = boundary.end();
    }

    if let Some(rest) = text.get(start..) {
        fragments.push(rest);
    }

    fragments
}

/// True when the two characters before `period` are
/// `(whitespace or '.')(ASCII letter or digit)`.
///
/// A period with fewer than two characters before it never closes an initial.
fn closes_initial(text: &str, period: usize) -> bool {
    let Some(before) = text.get(..period) else {
        return false;
    };

    let mut preceding = before.chars().rev();
    match (preceding.next(), preceding.next()) {
        (Some(initial), Some(separator)) => {
            initial.is_ascii_alphanumeric() && (separator.is_whitespace() || separator == '.')
        }
        _ => false,
    }
}

/// Pass 3: index walk over the fragments.
///
/// A fragment ending in an abbreviation absorbs the next fragment and both
/// are consumed. The merged sentence is not checked again. An abbreviation on
/// the last fragment has nothing to absorb and is emitted as is.
fn merge_abbreviations(fragments: &[&str]) -> Vec<String> {
    let mut sentences = Vec::with_capacity(fragments.len());
    let mut index = 0;

    while let Some(fragment) = fragments.get(index) {
        let next_index = index.saturating_add(1);

        match fragments.get(next_index) {
            Some(next) if ends_with_abbreviation(fragment) => {
                sentences.push(format!("{fragment} {next}"));
                index = next_index.saturating_add(1);
            }
            _ => {
                sentences.push((*fragment).to_string());
                index = next_index;
            }
        }
    }

    sentences
}

/// Check the last word, ignoring one leading punctuation character such as `(`
fn ends_with_abbreviation(fragment: &str) -> bool {
    let Some(last_word) = fragment.split_whitespace().next_back() else {
        return false;
    };

    let mut chars = last_word.chars();
    let word = match chars.next() {
        Some(first) if !first.is_ascii_alphanumeric() => chars.as_str(),
        _ => last_word,
    };

    ABBREVIATIONS.contains(&word)
}
