//! Keep-untokenized phrase guard.

use super::{CharFilter, map_free_segments, phrase};
use crate::analysis::patterns::CompiledPhrase;

/// Fuses configured multi-word phrases into single atomic spans.
///
/// Phrases are tried longest first, so `New York City` wins over `New York`
/// when both are configured.
#[derive(Clone, Debug)]
pub struct PhraseCharFilter {
    phrases: Vec<CompiledPhrase>,
}

impl PhraseCharFilter {
    pub fn new(phrases: Vec<CompiledPhrase>) -> Self {
        PhraseCharFilter { phrases }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl CharFilter for PhraseCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = input.to_string();
        for compiled in &self.phrases {
            let fused = phrase(&compiled.token);
            text = map_free_segments(&text, |free| {
                compiled
                    .regex
                    .replace_all(free, regex::NoExpand(&fused))
                    .into_owned()
            });
        }
        text
    }

    fn name(&self) -> &'static str {
        "phrase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::{MARK_CLOSE, PHRASE_OPEN};
    use crate::analysis::patterns::PatternRegistry;
    use crate::config::TokenizerConfig;

    fn filter_for(phrases: &[&str]) -> PhraseCharFilter {
        let config = TokenizerConfig {
            keep_untokenized: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        };
        PhraseCharFilter::new(PatternRegistry::compile(&config).unwrap().phrases)
    }

    #[test]
    fn test_longest_phrase_wins() {
        let filter = filter_for(&["New York", "New York City"]);
        let output = filter.filter("polite in New York City today");

        assert!(output.contains(&format!("{PHRASE_OPEN}new_york_city{MARK_CLOSE}")));
        assert!(!output.contains(&format!("{PHRASE_OPEN}new_york{MARK_CLOSE}")));
    }

    #[test]
    fn test_phrase_requires_word_boundary() {
        let filter = filter_for(&["Los Angeles"]);
        assert_eq!(filter.filter("XLos Angelesy"), "XLos Angelesy");
    }
}
