//! Token counting against the real cl100k vocabulary

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use std::sync::Arc;
use tokensplit_splitting::{
    SplittingError, TiktokenCounter, TokenCounter, TokenCounterRef, count_tokens,
};

fn cl100k() -> TiktokenCounter {
    TiktokenCounter::cl100k().expect("cl100k vocabulary should load")
}

#[test]
fn test_batch_counts_match_single_counts() {
    let counter = cl100k();
    let texts = ["Hello, world!", "", "The quick brown fox jumps over the lazy dog."];

    let counts = count_tokens(&counter, &json!(texts)).unwrap();

    assert_eq!(counts.len(), texts.len());
    assert_eq!(counts.first(), Some(&4));
    assert_eq!(counts.get(1), Some(&0));
    for (text, count) in texts.iter().zip(&counts) {
        assert_eq!(counter.count(text), *count);
    }
}

#[test]
fn test_counting_is_deterministic() {
    let counter = cl100k();
    let text = "Determinism matters: the same input always gives the same count.";
    assert_eq!(counter.count(text), counter.count(text));
}

#[test]
fn test_special_token_text_is_counted_as_plain_text() {
    let counter = cl100k();
    // Encoded as ordinary characters, so more than one token
    assert!(counter.count("<|endoftext|>") > 1);
}

#[test]
fn test_shared_counter_across_threads() {
    let counter: TokenCounterRef = Arc::new(cl100k());
    let expected = counter.count("Shared across threads.");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            std::thread::spawn(move || counter.count("Shared across threads."))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_invalid_batches_are_rejected() {
    let counter = cl100k();

    assert!(matches!(
        count_tokens(&counter, &json!({"texts": []})),
        Err(SplittingError::InputType { .. })
    ));
    assert!(matches!(
        count_tokens(&counter, &json!(["fine", ["nested"]])),
        Err(SplittingError::ElementType { index: 1, .. })
    ));
}

#[test]
fn test_unknown_encoding_is_rejected() {
    assert!(matches!(
        TiktokenCounter::new("gpt2_base"),
        Err(SplittingError::UnsupportedEncoding(name)) if name == "gpt2_base"
    ));
}
