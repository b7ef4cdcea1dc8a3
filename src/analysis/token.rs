//! Token types for the analysis pipeline.
//!
//! A [`Token`] is a piece of text plus the [`TokenKind`] the splitter assigned
//! to it. The kind only steers the pipeline (placeholders are never
//! normalized, hashtags are eligible for segmentation, ...); the public output
//! of a tokenizer is a plain `Vec<String>`.
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::token::{Token, TokenKind};
//!
//! let token = Token::new("#maga", TokenKind::Hashtag);
//! assert_eq!(token.text, "#maga");
//! assert!(!token.is_atomic());
//!
//! let placeholder = Token::new("URL", TokenKind::Placeholder);
//! assert!(placeholder.is_atomic());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token flowing through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token.
    pub text: String,

    /// What the splitter recognized this token as.
    pub kind: TokenKind,
}

/// Classification of token content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Ordinary word, possibly with internal apostrophes or hyphens.
    Word,
    /// Decimal number such as `3.14`.
    Number,
    /// `#hashtag`
    Hashtag,
    /// `@mention`
    Mention,
    /// Emoji grapheme.
    Emoji,
    /// Run of punctuation or symbols.
    Punctuation,
    /// A line break.
    LineBreak,
    /// Literal label substituted for an entity.
    Placeholder,
    /// A keep-untokenized phrase.
    Phrase,
    /// URL or email left in place.
    Protected,
    /// Anything else.
    Other,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, kind: TokenKind) -> Self {
        Token {
            text: text.into(),
            kind,
        }
    }

    /// Create a word token.
    pub fn word<S: Into<String>>(text: S) -> Self {
        Token::new(text, TokenKind::Word)
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            kind: self.kind,
        }
    }

    /// Atomic tokens pass through normalization, stopword removal and
    /// stemming untouched.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Placeholder | TokenKind::Phrase | TokenKind::Protected
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.text
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
