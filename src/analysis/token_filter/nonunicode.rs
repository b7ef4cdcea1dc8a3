//! Non-Latin token removal.

use regex::Regex;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Drops every token that contains a character outside the Latin scripts
/// and general punctuation, such as Cyrillic words or emoji.
///
/// Atomic tokens are kept: a placeholder is trusted even if its label is
/// not Latin.
#[derive(Clone, Debug)]
pub struct NonUnicodeFilter {
    non_latin: Regex,
}

impl NonUnicodeFilter {
    /// Create the filter from the compiled non-Latin character class.
    pub fn new(non_latin: Regex) -> Self {
        NonUnicodeFilter { non_latin }
    }
}

impl Filter for NonUnicodeFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let non_latin = self.non_latin.clone();
        Ok(Box::new(tokens.filter(move |token| {
            token.is_atomic() || !non_latin.is_match(&token.text)
        })))
    }

    fn name(&self) -> &'static str {
        "non_unicode"
    }
}
