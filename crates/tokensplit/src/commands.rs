//! One-shot commands that print JSON to stdout

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tokensplit_splitting::{ChunkingService, TokenCounter};

/// Where the text to split comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    File(std::path::PathBuf),
    Stdin,
}

impl TextSource {
    pub fn from_args(text: Option<String>, file: Option<&Path>) -> Self {
        match (text, file) {
            (_, Some(path)) => Self::File(path.to_path_buf()),
            (Some(text), None) => Self::Inline(text),
            (None, None) => Self::Stdin,
        }
    }

    /// Read the full text
    ///
    /// # Errors
    ///
    /// Returns error if the file or stdin cannot be read as UTF-8
    pub fn read(self) -> Result<String> {
        match self {
            Self::Inline(text) => Ok(text),
            Self::File(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read '{}'", path.display())),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }
}

/// Token counts for `texts` as a JSON array
///
/// # Errors
///
/// Returns error if the counts cannot be serialized
pub fn count(counter: &dyn TokenCounter, texts: &[String]) -> Result<String> {
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    let counts = counter.count_batch(&texts);
    Ok(serde_json::to_string(&counts)?)
}

/// Split result for `text` as pretty JSON
///
/// # Errors
///
/// Returns error if the result cannot be serialized
pub fn split(service: &ChunkingService, text: &str) -> Result<String> {
    let result = service.split_text(text);
    tracing::info!(
        chunks = result.split_text.len(),
        max_length = service.budget().max_length,
        "Split text"
    );
    Ok(serde_json::to_string_pretty(&result)?)
}
