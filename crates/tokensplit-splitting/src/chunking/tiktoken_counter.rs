//! Tiktoken-based token counter for OpenAI BPE vocabularies

use super::traits::TokenCounter;
use crate::{SplittingError, SplittingResult};
use tiktoken_rs::{CoreBPE, Rank, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};
use tracing::info;

/// Token counter backed by a tiktoken vocabulary
///
/// The vocabulary is loaded once in [`TiktokenCounter::new`] and never
/// mutated afterwards.
pub struct TiktokenCounter {
    /// Encoding name for identification
    encoding: String,
    /// The tiktoken encoder
    encoder: CoreBPE,
}

impl TiktokenCounter {
    /// Load the named vocabulary
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedEncoding` for unknown names and `Encoder` if the
    /// vocabulary fails to load
    pub fn new(encoding: &str) -> SplittingResult<Self> {
        let encoding = encoding.trim().to_lowercase();
        let encoder = Self::load_encoding(&encoding)?;
        info!(encoding = %encoding, "Loaded BPE vocabulary");

        Ok(Self { encoding, encoder })
    }

    fn load_encoding(encoding: &str) -> SplittingResult<CoreBPE> {
        let encoder = match encoding {
            "cl100k_base" => cl100k_base()?,
            "o200k_base" => o200k_base()?,
            "p50k_base" => p50k_base()?,
            "p50k_edit" => p50k_edit()?,
            "r50k_base" => r50k_base()?,
            other => return Err(SplittingError::UnsupportedEncoding(other.to_string())),
        };

        Ok(encoder)
    }

    /// The vocabulary used by GPT-3.5/GPT-4 era models
    ///
    /// # Errors
    ///
    /// Returns `Encoder` if the vocabulary fails to load
    pub fn cl100k() -> SplittingResult<Self> {
        Self::new("cl100k_base")
    }

    /// Encode text into token ids.
    ///
    /// Special-token text such as `<|endoftext|>` is encoded as ordinary text.
    pub fn encode(&self, text: &str) -> Vec<Rank> {
        self.encoder.encode_ordinary(text)
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.encoding
    }

    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}
