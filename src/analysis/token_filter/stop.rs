//! Stop filter implementation.
//!
//! Removes common words. Built-in lists cover English and Russian; other
//! languages can be plugged in through a [`StopwordSource`].
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::token::{IntoTokenStream, Token};
//! use socialtok::analysis::token_filter::Filter;
//! use socialtok::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::from_words(vec!["vladimir", "putin", "and"]);
//! let tokens = vec![Token::word("Vladimir"), Token::word("is"), Token::word("AND")];
//!
//! let result: Vec<String> = filter
//!     .filter(tokens.into_token_stream())
//!     .unwrap()
//!     .map(String::from)
//!     .collect();
//!
//! assert_eq!(result, vec!["is"]);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, SocialtokError};

/// English stop words.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Russian stop words.
const RUSSIAN_STOP_WORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она", "так",
    "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее", "мне", "было",
    "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда", "даже", "ну", "вдруг",
    "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до", "вас", "нибудь", "опять", "уж",
    "вам", "ведь", "там", "потом", "себя", "ничего", "ей", "может", "они", "тут", "где", "есть",
    "надо", "ней", "для", "мы", "тебя", "их", "чем", "была", "сам", "чтоб", "без", "будто", "чего",
    "раз", "тоже", "себе", "под", "будет", "ж", "тогда", "кто", "этот", "того", "потому", "этого",
    "какой", "совсем", "ним", "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее",
    "сейчас", "были", "куда", "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об",
    "другой", "хоть", "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего",
    "них", "какая", "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой",
    "перед", "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда",
    "конечно", "всю", "между",
];

/// English stop words as a HashSet.
pub static ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    ENGLISH_STOP_WORDS.iter().map(|&s| s.to_string()).collect()
});

/// Russian stop words as a HashSet.
pub static RUSSIAN_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    RUSSIAN_STOP_WORDS.iter().map(|&s| s.to_string()).collect()
});

/// Provides stop word lists by language name.
pub trait StopwordSource: Send + Sync {
    /// Stop words for `language`, or `None` if the language is unknown.
    fn stopwords(&self, language: &str) -> Option<HashSet<String>>;

    /// Get the name of this source.
    fn name(&self) -> &'static str;
}

/// The built-in English and Russian lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinStopwords;

impl StopwordSource for BuiltinStopwords {
    fn stopwords(&self, language: &str) -> Option<HashSet<String>> {
        match language.to_lowercase().as_str() {
            "english" | "en" => Some(ENGLISH_STOP_WORDS_SET.clone()),
            "russian" | "ru" => Some(RUSSIAN_STOP_WORDS_SET.clone()),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

/// A filter that removes stop words from the token stream.
///
/// Matching is case-insensitive. Placeholders, phrases and kept URLs are
/// never removed.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// Lower-cased stop words
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the English stop words.
    pub fn new() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words.into_iter().map(|w| w.to_lowercase()).collect()),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Create a stop filter for a language known to `source`.
    pub fn for_language(source: &dyn StopwordSource, language: &str) -> Result<Self> {
        source
            .stopwords(language)
            .map(Self::with_stop_words)
            .ok_or_else(|| {
                SocialtokError::configuration(format!(
                    "no stop words for language '{language}' in source '{}'",
                    source.name()
                ))
            })
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word) || self.stop_words.contains(&word.to_lowercase())
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| token.is_atomic() || !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, TokenKind};

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words.iter().map(|w| Token::word(*w)).collect();
        filter
            .filter(tokens.into_token_stream())
            .unwrap()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_builtin_lists() {
        assert_eq!(ENGLISH_STOP_WORDS_SET.len(), 179);
        assert_eq!(RUSSIAN_STOP_WORDS_SET.len(), 151);

        let english = StopFilter::for_language(&BuiltinStopwords, "english").unwrap();
        assert!(run(&english, &["for", "on", "you"]).is_empty());

        let russian = StopFilter::for_language(&BuiltinStopwords, "russian").unwrap();
        assert_eq!(run(&russian, &["привет", "я", "Женя"]), vec!["привет", "Женя"]);
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            StopFilter::for_language(&BuiltinStopwords, "klingon"),
            Err(SocialtokError::Configuration(_))
        ));
    }

    #[test]
    fn test_case_insensitive_custom_list() {
        let filter = StopFilter::from_words(vec!["Vladimir", "putin", "and"]);
        assert_eq!(
            run(&filter, &["Vladimir", "Putin", "is", "the", "BEST", "AND", "AMAZING"]),
            vec!["is", "the", "BEST", "AMAZING"]
        );
    }

    #[test]
    fn test_atomic_tokens_kept() {
        let filter = StopFilter::from_words(vec!["url"]);
        let tokens = vec![Token::new("url", TokenKind::Placeholder), Token::word("url")];
        let result: Vec<String> = filter
            .filter(tokens.into_token_stream())
            .unwrap()
            .map(String::from)
            .collect();
        assert_eq!(result, vec!["url"]);
    }
}
