//! English contraction expansion.

use crate::analysis::token::{Token, TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Contraction suffixes and their expansions, tried in order.
///
/// An expansion without a leading space replaces the whole word.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "can not"),
    ("n't", " not"),
    ("'re", " are"),
    ("'s", " is"),
    ("'d", " would"),
    ("'ll", " will"),
    ("'t", " not"),
    ("'ve", " have"),
    ("'m", " am"),
];

/// Expands a fixed table of English contractions (`I've` → `I have`,
/// `won't` → `will not`). Words not covered by the table pass through.
#[derive(Clone, Debug, Default)]
pub struct DecontractionFilter;

impl DecontractionFilter {
    pub fn new() -> Self {
        DecontractionFilter
    }

    /// Expand a single word, or `None` if it is not a known contraction.
    pub fn expand(word: &str) -> Option<String> {
        let normalized = word.replace('’', "'");

        CONTRACTIONS.iter().find_map(|&(suffix, expansion)| {
            let split = normalized.len().checked_sub(suffix.len())?;
            if !normalized.is_char_boundary(split)
                || !normalized[split..].eq_ignore_ascii_case(suffix)
            {
                return None;
            }

            let stem = &normalized[..split];
            if expansion.starts_with(' ') && stem.is_empty() {
                return None;
            }
            Some(format!("{stem}{expansion}"))
        })
    }
}

impl Filter for DecontractionFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut expanded = Vec::new();

        for token in tokens {
            if token.kind != TokenKind::Word {
                expanded.push(token);
                continue;
            }

            match Self::expand(&token.text) {
                Some(words) => {
                    expanded.extend(words.split_whitespace().map(Token::word));
                }
                None => expanded.push(token),
            }
        }

        Ok(Box::new(expanded.into_iter()))
    }

    fn name(&self) -> &'static str {
        "decontraction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::IntoTokenStream;

    #[test]
    fn test_expand_table() {
        assert_eq!(DecontractionFilter::expand("i've").as_deref(), Some("i have"));
        assert_eq!(DecontractionFilter::expand("won't").as_deref(), Some("will not"));
        assert_eq!(DecontractionFilter::expand("Can't").as_deref(), Some("can not"));
        assert_eq!(DecontractionFilter::expand("isn't").as_deref(), Some("is not"));
        assert_eq!(DecontractionFilter::expand("they’re").as_deref(), Some("they are"));
        assert_eq!(DecontractionFilter::expand("I'm").as_deref(), Some("I am"));
        assert_eq!(DecontractionFilter::expand("beer"), None);
        assert_eq!(DecontractionFilter::expand("'s"), None);
    }

    #[test]
    fn test_filter_splits_expansions() {
        let tokens = vec![Token::word("i"), Token::word("won't"), Token::word("give")];
        let result: Vec<String> = DecontractionFilter::new()
            .filter(tokens.into_token_stream())
            .unwrap()
            .map(String::from)
            .collect();

        assert_eq!(result, vec!["i", "will", "not", "give"]);
    }
}
