//! Repeated-character normalization.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Collapses runs of the same letter longer than `max_repeats` down to
/// exactly `max_repeats` (`loooove` becomes `looove` with 3).
///
/// Only alphabetic runs are collapsed; `!!!!` and `1000` are left alone.
#[derive(Clone, Debug)]
pub struct RepeatedCharFilter {
    max_repeats: usize,
}

impl RepeatedCharFilter {
    pub fn new(max_repeats: usize) -> Self {
        RepeatedCharFilter {
            max_repeats: max_repeats.max(1),
        }
    }

    pub fn max_repeats(&self) -> usize {
        self.max_repeats
    }

    /// Collapse letter runs in a single word.
    pub fn collapse(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut previous = None;
        let mut run = 0;

        for c in text.chars() {
            if Some(c) == previous {
                run += 1;
            } else {
                previous = Some(c);
                run = 1;
            }

            if run <= self.max_repeats || !c.is_alphabetic() {
                output.push(c);
            }
        }

        output
    }
}

impl Filter for RepeatedCharFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_atomic() {
                    token
                } else {
                    let collapsed = self.collapse(&token.text);
                    token.with_text(collapsed)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "repeated_char"
    }
}
