//! Token filter implementations for token transformation.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod case;
pub mod decontract;
pub mod hashtag;
pub mod linebreak;
pub mod ngram;
pub mod nonunicode;
pub mod punct;
pub mod repeat;
pub mod stem;
pub mod stop;

// Re-export all filters for convenient access
pub use case::CaseFilter;
pub use decontract::DecontractionFilter;
pub use hashtag::HashtagSplitFilter;
pub use linebreak::LineBreakFilter;
pub use ngram::NgramFilter;
pub use nonunicode::NonUnicodeFilter;
pub use punct::PunctuationFilter;
pub use repeat::RepeatedCharFilter;
pub use stem::{LookupLemmatizer, PorterStemmer, StemFilter, Stemmer};
pub use stop::{BuiltinStopwords, StopFilter, StopwordSource};
