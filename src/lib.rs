//! # socialtok
//!
//! A configurable tokenizer for noisy social-media text such as tweets and
//! Reddit posts.
//!
//! ## Features
//!
//! - URL, email, handle, subreddit, hashtag and number replacement
//! - Optional URL unwrapping through an injectable resolver
//! - Case folding with an all-caps exception, repeated-letter collapsing
//!   and contraction expansion
//! - Dictionary-based hashtag segmentation
//! - Emoji polarity classes, stopwords, stemming and n-grams
//! - Order-preserving parallel batch tokenization
//!
//! ## Example
//!
//! ```
//! use socialtok::prelude::*;
//!
//! let config = TokenizerConfig {
//!     twitter_handles: EntityAction::replace("TOKENTWITTERHANDLE"),
//!     ..TokenizerConfig::default()
//! };
//! let tokenizer = SocialTokenizer::new(config).unwrap();
//!
//! assert_eq!(
//!     tokenizer.tokenize("@putin loves vodka").unwrap(),
//!     vec!["TOKENTWITTERHANDLE", "loves", "vodka"]
//! );
//! ```

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod social_tokenizer;

pub mod prelude {
    pub use crate::analysis::emoji::{EmojiLexicon, Polarity};
    pub use crate::analysis::segmenter::{Dictionary, HashtagSegmenter};
    pub use crate::analysis::token_filter::{StopwordSource, Stemmer};
    pub use crate::batch::{BatchConfig, BatchTokenizer, CancellationToken, FailurePolicy};
    pub use crate::config::{EntityAction, StemOption, StopwordsOption, TokenizerConfig, UrlMode};
    pub use crate::error::{Result, SocialtokError};
    pub use crate::resolver::UrlResolver;
    pub use crate::social_tokenizer::{SocialTokenizer, SocialTokenizerBuilder};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
