//! Token counting and budgeted chunk packing

pub mod service;
pub mod tiktoken_counter;
pub mod traits;

pub use service::{Chunk, ChunkingService, SplitResult, TokenBudget};
pub use tiktoken_counter::TiktokenCounter;
pub use traits::{TokenCounter, TokenCounterRef};
