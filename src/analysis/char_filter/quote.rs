//! Quote removal.

use regex::Regex;

use super::CharFilter;
use crate::analysis::patterns::CompiledPatternSet;

/// Drops attributed quotations before anything else sees the text.
///
/// Double-quoted spans (straight or curly) are removed when `quotes` is set;
/// lines starting with `>` are removed when `reddit_quotes` is set.
#[derive(Clone, Debug)]
pub struct QuoteCharFilter {
    quote: Option<Regex>,
    reddit_quote: Option<Regex>,
}

impl QuoteCharFilter {
    /// Create a quote filter from the compiled pattern set.
    pub fn new(patterns: &CompiledPatternSet, quotes: bool, reddit_quotes: bool) -> Self {
        QuoteCharFilter {
            quote: quotes.then(|| patterns.quote.clone()),
            reddit_quote: reddit_quotes.then(|| patterns.reddit_quote.clone()),
        }
    }

    /// Whether this filter removes anything at all.
    pub fn is_enabled(&self) -> bool {
        self.quote.is_some() || self.reddit_quote.is_some()
    }
}

impl CharFilter for QuoteCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = input.to_string();

        if let Some(reddit_quote) = &self.reddit_quote {
            text = reddit_quote.replace_all(&text, "").into_owned();
        }
        if let Some(quote) = &self.quote {
            text = quote.replace_all(&text, " ").into_owned();
        }

        text
    }

    fn name(&self) -> &'static str {
        "quote"
    }
}
