//! Word n-gram filter.
//!
//! Appends every 2..=n-gram of the token list after the tokens themselves,
//! joined with `_` and ordered by n, then by position.
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::token::{IntoTokenStream, Token};
//! use socialtok::analysis::token_filter::Filter;
//! use socialtok::analysis::token_filter::ngram::NgramFilter;
//!
//! let filter = NgramFilter::new(2).unwrap();
//! let tokens = vec![Token::word("i"), Token::word("love"), Token::word("beer")];
//! let result: Vec<String> = filter
//!     .filter(tokens.into_token_stream())
//!     .unwrap()
//!     .map(String::from)
//!     .collect();
//!
//! assert_eq!(result, vec!["i", "love", "beer", "i_love", "love_beer"]);
//! ```

use crate::analysis::token::{Token, TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, SocialtokError};

/// Appends word n-grams up to a maximum size.
#[derive(Clone, Debug)]
pub struct NgramFilter {
    max_n: usize,
}

impl NgramFilter {
    /// Create a filter emitting n-grams up to `max_n`. `max_n == 1` leaves the
    /// stream unchanged; zero is rejected.
    pub fn new(max_n: usize) -> Result<Self> {
        if max_n == 0 {
            return Err(SocialtokError::configuration("ngrams must be at least 1"));
        }
        Ok(NgramFilter { max_n })
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }
}

impl Filter for NgramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.max_n == 1 {
            return Ok(tokens);
        }

        let mut output: Vec<Token> = tokens.collect();
        let words: Vec<String> = output.iter().map(|t| t.text.clone()).collect();

        for n in 2..=self.max_n.min(words.len()) {
            output.extend(
                words
                    .windows(n)
                    .map(|window| Token::new(window.join("_"), TokenKind::Phrase)),
            );
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::IntoTokenStream;

    fn run(max_n: usize, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words.iter().map(|w| Token::word(*w)).collect();
        NgramFilter::new(max_n)
            .unwrap()
            .filter(tokens.into_token_stream())
            .unwrap()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_unigrams_unchanged() {
        assert_eq!(run(1, &["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_trigrams() {
        assert_eq!(
            run(3, &["a", "b", "c", "d"]),
            vec!["a", "b", "c", "d", "a_b", "b_c", "c_d", "a_b_c", "b_c_d"]
        );
    }

    #[test]
    fn test_n_larger_than_input() {
        assert_eq!(run(5, &["a", "b"]), vec!["a", "b", "a_b"]);
        assert!(run(3, &[]).is_empty());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(NgramFilter::new(0).is_err());
    }
}
