//! Chunking service for token-budgeted sentence packing

use super::traits::TokenCounterRef;
use crate::segmenting::split_sentences;
use serde::{Deserialize, Serialize};
use tokensplit_config::DEFAULT_THIN_CHUNK_RATIO;
use tracing::debug;

/// Token budget configuration for chunking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenBudget {
    /// Upper bound on a chunk's token count
    pub max_length: usize,
    /// Trailing chunks with `tokens <= max_length * thin_ratio` get backfilled
    pub thin_ratio: f64,
}

impl TokenBudget {
    /// Create a budget with the default thin-chunk ratio
    pub const fn new(max_length: usize) -> Self {
        Self {
            max_length,
            thin_ratio: DEFAULT_THIN_CHUNK_RATIO,
        }
    }

    #[must_use]
    pub const fn with_thin_ratio(mut self, thin_ratio: f64) -> Self {
        self.thin_ratio = thin_ratio;
        self
    }

    /// Whether a trailing chunk of `tokens` should be padded
    #[allow(clippy::cast_precision_loss)]
    pub fn is_thin(&self, tokens: usize) -> bool {
        tokens > 0 && tokens as f64 <= self.max_length as f64 * self.thin_ratio
    }
}

/// One packed chunk: sentences joined by single spaces, plus their token total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub token_count: usize,
}

/// Parallel chunk texts and token counts, index-aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    pub split_text: Vec<String>,
    pub split_tokens: Vec<usize>,
}

impl From<Vec<Chunk>> for SplitResult {
    fn from(chunks: Vec<Chunk>) -> Self {
        let (split_text, split_tokens) = chunks
            .into_iter()
            .map(|chunk| (chunk.text, chunk.token_count))
            .unzip();

        Self {
            split_text,
            split_tokens,
        }
    }
}

/// Service for packing sentences into token-limited chunks
pub struct ChunkingService {
    counter: TokenCounterRef,
    budget: TokenBudget,
}

impl ChunkingService {
    /// Create a new chunking service
    pub fn new(counter: TokenCounterRef, budget: TokenBudget) -> Self {
        Self { counter, budget }
    }

    pub const fn budget(&self) -> TokenBudget {
        self.budget
    }

    /// Segment `text` into sentences and pack them
    pub fn split_text(&self, text: &str) -> SplitResult {
        let sentences = split_sentences(text);
        SplitResult::from(self.chunk_sentences(&sentences))
    }

    /// Greedily pack sentences into chunks of at most `max_length` tokens.
    ///
    /// A sentence is never split: one that alone exceeds the budget becomes a
    /// chunk of its own. A thin trailing chunk is padded in front with
    /// sentences taken backwards from the rest of the document, see
    /// [`Self::backfill`].
    pub fn chunk_sentences(&self, sentences: &[String]) -> Vec<Chunk> {
        let counts: Vec<usize> = sentences
            .iter()
            .map(|sentence| self.counter.count(sentence))
            .collect();

        let mut chunks = Vec::new();
        // Indices into `sentences`; backfill may repeat an index
        let mut current: Vec<usize> = Vec::new();
        let mut current_tokens = 0usize;

        for (index, &tokens) in counts.iter().enumerate() {
            if current_tokens.saturating_add(tokens) > self.budget.max_length
                && !current.is_empty()
            {
                chunks.push(assemble(sentences, &current, current_tokens));
                current.clear();
                current_tokens = 0;
            }

            current.push(index);
            current_tokens = current_tokens.saturating_add(tokens);
        }

        if !current.is_empty() {
            if self.budget.is_thin(current_tokens) {
                let (fill, fill_tokens) =
                    self.backfill(&counts, current.len(), !chunks.is_empty(), current_tokens);

                debug!(
                    trailing_tokens = current_tokens,
                    fill_sentences = fill.len(),
                    fill_tokens,
                    "Backfilled thin trailing chunk"
                );

                current_tokens = current_tokens.saturating_add(fill_tokens);
                current.splice(0..0, fill);
            }

            chunks.push(assemble(sentences, &current, current_tokens));
        }

        chunks.retain(|chunk| !chunk.text.is_empty());

        debug!(
            sentences = sentences.len(),
            chunks = chunks.len(),
            max_length = self.budget.max_length,
            "Packed sentences into chunks"
        );

        chunks
    }

    /// Pick sentences to put in front of a thin trailing chunk.
    ///
    /// Candidates run backwards through the document. When earlier chunks
    /// exist, the trailing chunk's own sentences are skipped, so the fill
    /// re-uses the end of the previous chunk(s). When the trailing chunk is
    /// the whole document, the reversed document is repeated
    /// `ceil(max_length / trailing_tokens)` times so short texts wrap around.
    /// Candidates are accepted until the first one that would overflow.
    ///
    /// Returns the accepted indices in walk order and their token total.
    fn backfill(
        &self,
        counts: &[usize],
        trailing_len: usize,
        has_previous_chunks: bool,
        trailing_tokens: usize,
    ) -> (Vec<usize>, usize) {
        let reversed = (0..counts.len()).rev();

        if has_previous_chunks {
            self.fill_from(counts, reversed.skip(trailing_len), trailing_tokens)
        } else {
            let passes = self.budget.max_length.div_ceil(trailing_tokens.max(1));
            let candidates = reversed.cycle().take(counts.len().saturating_mul(passes));
            self.fill_from(counts, candidates, trailing_tokens)
        }
    }

    fn fill_from(
        &self,
        counts: &[usize],
        candidates: impl Iterator<Item = usize>,
        trailing_tokens: usize,
    ) -> (Vec<usize>, usize) {
        let mut fill = Vec::new();
        let mut total = trailing_tokens;

        for index in candidates {
            let tokens = counts.get(index).copied().unwrap_or_default();
            if total.saturating_add(tokens) > self.budget.max_length {
                break;
            }
            fill.push(index);
            total = total.saturating_add(tokens);
        }

        (fill, total.saturating_sub(trailing_tokens))
    }
}

fn assemble(sentences: &[String], indices: &[usize], token_count: usize) -> Chunk {
    let text = indices
        .iter()
        .filter_map(|&index| sentences.get(index).map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    Chunk { text, token_count }
}
