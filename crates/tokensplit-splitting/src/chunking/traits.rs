//! Trait definitions for token counting

use std::sync::Arc;

/// Trait for counting tokens in text
///
/// Implementations wrap an immutable vocabulary and are shared read-only
/// across requests, so they must be `Send + Sync`.
pub trait TokenCounter: Send + Sync {
    /// Get the name/identifier of this counter (the vocabulary name)
    fn name(&self) -> &str;

    /// Count tokens in the given text
    ///
    /// This must be deterministic for the same input
    fn count(&self, text: &str) -> usize;

    /// Count tokens for multiple texts, preserving order
    fn count_batch(&self, texts: &[&str]) -> Vec<usize> {
        texts.iter().map(|text| self.count(text)).collect()
    }
}

/// Type alias for shared token counter
pub type TokenCounterRef = Arc<dyn TokenCounter>;
