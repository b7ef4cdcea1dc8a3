use crate::analysis::token::{TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Drops line-break tokens so that line breaks act as plain whitespace.
#[derive(Clone, Debug, Default)]
pub struct LineBreakFilter;

impl LineBreakFilter {
    pub fn new() -> Self {
        LineBreakFilter
    }
}

impl Filter for LineBreakFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(|token| token.kind != TokenKind::LineBreak)))
    }

    fn name(&self) -> &'static str {
        "line_break"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, Token};

    #[test]
    fn test_line_breaks_dropped() {
        let tokens = vec![
            Token::word("I"),
            Token::new("\n", TokenKind::LineBreak),
            Token::word("love"),
        ];
        let result: Vec<String> = LineBreakFilter::new()
            .filter(tokens.into_token_stream())
            .unwrap()
            .map(String::from)
            .collect();

        assert_eq!(result, vec!["I", "love"]);
    }
}
