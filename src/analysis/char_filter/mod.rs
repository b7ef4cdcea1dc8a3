//! Char filter implementations for text-level rewriting.
//!
//! Char filters run before the word splitter. They remove quoted spans, fuse
//! protected phrases, and substitute entities (URLs, handles, emoji, ...) with
//! placeholder tokens.
//!
//! A substituted span is wrapped in private-use marker characters so that the
//! splitter emits it as one atomic token and later char filters leave it
//! alone. Marker characters are stripped from the raw input first, so user
//! text can never forge a span.
//!
//! # Available Filters
//!
//! - [`quote::QuoteCharFilter`] - Drops double-quoted spans and `>` quote lines
//! - [`phrase::PhraseCharFilter`] - Fuses keep-untokenized phrases
//! - [`pattern_replace::PatternReplaceCharFilter`] - User-supplied regex rules
//! - [`entity::EntityCharFilter`] - URLs, emails, handles, hashtags, numbers
//! - [`emoji::EmojiCharFilter`] - Emoji polarity classes

use std::borrow::Cow;

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod emoji;
pub mod entity;
pub mod pattern_replace;
pub mod phrase;
pub mod quote;

pub use emoji::EmojiCharFilter;
pub use entity::EntityCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
pub use phrase::PhraseCharFilter;
pub use quote::QuoteCharFilter;

/// Opens a placeholder span.
pub const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes any marked span.
pub const MARK_CLOSE: char = '\u{E001}';
/// Opens a keep-untokenized phrase span.
pub const PHRASE_OPEN: char = '\u{E002}';
/// Opens a protected (kept URL or email) span.
pub const PROTECTED_OPEN: char = '\u{E004}';

/// Whether `c` belongs to the reserved marker range.
pub fn is_marker(c: char) -> bool {
    ('\u{E000}'..='\u{E005}').contains(&c)
}

fn is_open_marker(c: char) -> bool {
    matches!(c, PLACEHOLDER_OPEN | PHRASE_OPEN | PROTECTED_OPEN)
}

/// Remove reserved marker characters from raw input.
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_marker) {
        Cow::Owned(text.chars().filter(|&c| !is_marker(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Wrap a label as a placeholder span. An empty label yields plain whitespace.
pub fn placeholder(label: &str) -> String {
    if label.is_empty() {
        " ".to_string()
    } else {
        format!(" {PLACEHOLDER_OPEN}{label}{MARK_CLOSE} ")
    }
}

/// Wrap a fused phrase as a phrase span.
pub fn phrase(text: &str) -> String {
    format!(" {PHRASE_OPEN}{text}{MARK_CLOSE} ")
}

/// Wrap text that must survive splitting untouched.
pub fn protected(text: &str) -> String {
    format!(" {PROTECTED_OPEN}{text}{MARK_CLOSE} ")
}

/// Rewrite only the text outside marked spans.
///
/// Marked spans are copied verbatim; each free segment between them is passed
/// through `rewrite`.
pub fn map_free_segments<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(is_open_marker) {
        output.push_str(&rewrite(&rest[..open]));

        let span = &rest[open..];
        match span.find(MARK_CLOSE) {
            Some(close) => {
                let end = close + MARK_CLOSE.len_utf8();
                output.push_str(&span[..end]);
                rest = &span[end..];
            }
            None => {
                output.push_str(span);
                rest = "";
            }
        }
    }

    output.push_str(&rewrite(rest));
    output
}
