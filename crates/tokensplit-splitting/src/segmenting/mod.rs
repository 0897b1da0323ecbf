//! Sentence segmentation

pub mod sentences;

pub use sentences::{ABBREVIATIONS, split_sentences};
