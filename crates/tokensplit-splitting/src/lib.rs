//! Tokensplit splitting crate
//!
//! This crate provides BPE token counting, sentence segmentation and greedy
//! token-budgeted packing of sentences into chunks, with a backfill pass that
//! pads a thin trailing chunk.

pub mod chunking;
pub mod counting;
pub mod error;
pub mod json;
pub mod request;
pub mod segmenting;

// Re-export main types
pub use chunking::{
    Chunk, ChunkingService, SplitResult, TiktokenCounter, TokenBudget, TokenCounter,
    TokenCounterRef,
};
pub use counting::count_tokens;
pub use error::{SplittingError, SplittingResult};
pub use json::JsonKind;
pub use request::{SplitRequest, validate_max_length};
pub use segmenting::split_sentences;
