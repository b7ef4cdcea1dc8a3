//! Text analysis module for socialtok.
//!
//! This module provides the building blocks of the tokenization pipeline:
//! char filters that rewrite raw text, the word splitter, token filters that
//! normalize the split words, and the [`PipelineAnalyzer`] that chains them.

pub mod analyzer;
pub mod char_filter;
pub mod emoji;
pub mod patterns;
pub mod segmenter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
