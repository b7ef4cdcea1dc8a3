//! Case filter implementation.
//!
//! Lower-cases tokens, optionally keeping all-caps words such as `BEST` or
//! `I` verbatim.
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::token::{IntoTokenStream, Token};
//! use socialtok::analysis::token_filter::Filter;
//! use socialtok::analysis::token_filter::case::CaseFilter;
//!
//! let filter = CaseFilter::new().keep_caps(true);
//! let tokens = vec![Token::word("Vladimir"), Token::word("BEST")];
//! let result: Vec<String> = filter
//!     .filter(tokens.into_token_stream())
//!     .unwrap()
//!     .map(String::from)
//!     .collect();
//!
//! assert_eq!(result, vec!["vladimir", "BEST"]);
//! ```

use crate::analysis::token::{TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Atomic tokens (placeholders, phrases, kept URLs) and emoji are never
/// touched.
#[derive(Clone, Debug, Default)]
pub struct CaseFilter {
    keep_caps: bool,
}

impl CaseFilter {
    /// Create a new case filter that lower-cases everything.
    pub fn new() -> Self {
        CaseFilter { keep_caps: false }
    }

    /// Keep tokens made only of upper-case letters.
    pub fn keep_caps(mut self, keep: bool) -> Self {
        self.keep_caps = keep;
        self
    }

    fn is_all_caps(text: &str) -> bool {
        text.chars().all(char::is_alphabetic)
            && text.chars().any(char::is_uppercase)
            && !text.chars().any(char::is_lowercase)
    }
}

impl Filter for CaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_atomic()
                    || token.kind == TokenKind::Emoji
                    || (self.keep_caps && Self::is_all_caps(&token.text))
                {
                    token
                } else {
                    let lowered = token.text.to_lowercase();
                    token.with_text(lowered)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "case"
    }
}
