//! Word splitter for social-media text.

use regex::{Captures, Regex};

use super::Tokenizer;
use crate::analysis::char_filter::{PHRASE_OPEN, PLACEHOLDER_OPEN, PROTECTED_OPEN};
use crate::analysis::patterns::CompiledPatternSet;
use crate::analysis::token::{IntoTokenStream, Token, TokenKind, TokenStream};
use crate::error::Result;

const GROUPS: &[(&str, TokenKind)] = &[
    ("linebreak", TokenKind::LineBreak),
    ("hashtag", TokenKind::Hashtag),
    ("mention", TokenKind::Mention),
    ("number", TokenKind::Number),
    ("word", TokenKind::Word),
    ("emoji", TokenKind::Emoji),
    ("punct", TokenKind::Punctuation),
    ("other", TokenKind::Other),
];

/// Splits text on whitespace and punctuation boundaries.
///
/// Marked spans produced by the char filters become single atomic tokens.
/// Words keep internal apostrophes and hyphens (`isn't`, `45-year`), runs of
/// punctuation stay together, and each emoji grapheme is its own token.
#[derive(Clone, Debug)]
pub struct SocialWordTokenizer {
    pattern: Regex,
}

impl SocialWordTokenizer {
    pub fn new(patterns: &CompiledPatternSet) -> Self {
        SocialWordTokenizer {
            pattern: patterns.word_split.clone(),
        }
    }

    fn token_from(captures: &Captures<'_>) -> Option<Token> {
        if let Some(marked) = captures.name("marked") {
            return Self::marked_token(marked.as_str());
        }

        let (text, kind) = GROUPS
            .iter()
            .find_map(|&(group, kind)| captures.name(group).map(|m| (m.as_str(), kind)))?;

        Some(match kind {
            TokenKind::LineBreak => Token::new("\n", kind),
            TokenKind::Word if text.chars().all(|c| c.is_ascii_digit()) => {
                Token::new(text, TokenKind::Number)
            }
            _ => Token::new(text, kind),
        })
    }

    fn marked_token(span: &str) -> Option<Token> {
        let mut chars = span.chars();
        let kind = match chars.next()? {
            PLACEHOLDER_OPEN => TokenKind::Placeholder,
            PHRASE_OPEN => TokenKind::Phrase,
            PROTECTED_OPEN => TokenKind::Protected,
            _ => return None,
        };
        chars.next_back();

        let inner = chars.as_str();
        if inner.trim().is_empty() {
            None
        } else {
            Some(Token::new(inner, kind))
        }
    }
}

impl Tokenizer for SocialWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .captures_iter(text)
            .filter_map(|captures| Self::token_from(&captures))
            .collect();

        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "social_word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::{phrase, placeholder, protected};
    use crate::analysis::patterns::PatternRegistry;
    use crate::config::TokenizerConfig;

    fn tokenize(text: &str) -> Vec<Token> {
        let patterns = PatternRegistry::compile(&TokenizerConfig::default()).unwrap();
        SocialWordTokenizer::new(&patterns)
            .tokenize(text)
            .unwrap()
            .collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let tokens = tokenize("amazing, isn't it? who knows...");
        assert_eq!(
            texts(&tokens),
            vec!["amazing", ",", "isn't", "it", "?", "who", "knows", "..."]
        );
        assert_eq!(tokens[1].kind, TokenKind::Punctuation);
    }

    #[test]
    fn test_kinds() {
        let tokens = tokenize("#MAGA @user 3.14 24 45-year 😭\nok");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Hashtag,
                TokenKind::Mention,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Word,
                TokenKind::Emoji,
                TokenKind::LineBreak,
                TokenKind::Word,
            ]
        );
    }

    #[test]
    fn test_marked_spans_are_atomic() {
        let text = format!(
            "in{}than{}see{}",
            phrase("new_york_city"),
            placeholder("TOKEN-X"),
            protected("http://a.b/c?d=1")
        );
        let tokens = tokenize(&text);

        assert_eq!(
            texts(&tokens),
            vec!["in", "new_york_city", "than", "TOKEN-X", "see", "http://a.b/c?d=1"]
        );
        assert_eq!(tokens[1].kind, TokenKind::Phrase);
        assert_eq!(tokens[3].kind, TokenKind::Placeholder);
        assert_eq!(tokens[5].kind, TokenKind::Protected);
    }

    #[test]
    fn test_phrase_with_space_stays_whole() {
        let tokens = tokenize(&phrase("los angeles"));
        assert_eq!(texts(&tokens), vec!["los angeles"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }
}
