//! Punctuation removal.

use crate::analysis::token::{TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Drops punctuation tokens and strips punctuation from the ends of words.
///
/// Internal apostrophes and hyphens survive (`isn't`, `45-year`). Hashtags,
/// mentions, emoji and atomic tokens are not stripped.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    pub fn new() -> Self {
        PunctuationFilter
    }

    fn strips(kind: TokenKind) -> bool {
        matches!(kind, TokenKind::Word | TokenKind::Number | TokenKind::Other)
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter_map(|token| {
                if token.kind == TokenKind::Punctuation {
                    return None;
                }
                if !Self::strips(token.kind) {
                    return Some(token);
                }

                let trimmed = token.text.trim_matches(|c: char| !c.is_alphanumeric());
                if trimmed.is_empty() {
                    None
                } else if trimmed.len() == token.text.len() {
                    Some(token)
                } else {
                    Some(token.with_text(trimmed))
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
