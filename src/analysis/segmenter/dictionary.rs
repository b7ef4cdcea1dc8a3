//! Word-frequency dictionary for hashtag segmentation.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{Result, SocialtokError};

/// Single-letter words that are accepted as segments.
const SINGLE_LETTER_WORDS: &[&str] = &["a", "i"];

/// A case-insensitive word list with corpus frequencies.
///
/// Words shorter than two characters are ignored, except `a` and `i`, so
/// that stray letters do not produce degenerate segmentations.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    words: Arc<AHashMap<String, u64>>,
    max_word_chars: usize,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary where every word has frequency 1.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_frequencies(words.into_iter().map(|w| (w, 1)))
    }

    /// Build a dictionary from `(word, frequency)` pairs. Repeated words
    /// accumulate their frequencies.
    pub fn from_frequencies<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut words: AHashMap<String, u64> = AHashMap::new();
        for (word, frequency) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if Self::is_admissible(&word) {
                *words.entry(word).or_insert(0) += frequency;
            }
        }

        let max_word_chars = words.keys().map(|w| w.chars().count()).max().unwrap_or(0);
        Dictionary {
            words: Arc::new(words),
            max_word_chars,
        }
    }

    /// Load a dictionary file with one `word` or `word count` entry per line
    /// (tab or space separated). Blank lines and `#` comments are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SocialtokError::configuration(format!(
                "failed to read hashtag dictionary '{}': {e}",
                path.display()
            ))
        })?;

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default();
            let frequency = match fields.next() {
                Some(count) => count.parse::<u64>().map_err(|e| {
                    SocialtokError::configuration(format!(
                        "{}:{}: invalid frequency '{count}': {e}",
                        path.display(),
                        line_no + 1
                    ))
                })?,
                None => 1,
            };
            entries.push((word.to_string(), frequency));
        }

        Ok(Self::from_frequencies(entries))
    }

    fn is_admissible(word: &str) -> bool {
        !word.is_empty()
            && (word.chars().count() >= 2 || SINGLE_LETTER_WORDS.contains(&word))
    }

    /// Whether `word` is in the dictionary, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.frequency(word).is_some()
    }

    /// Corpus frequency of `word`, ignoring case.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        match self.words.get(word) {
            Some(&frequency) => Some(frequency),
            None => self.words.get(&word.to_lowercase()).copied(),
        }
    }

    /// Length in characters of the longest word.
    pub fn max_word_chars(&self) -> usize {
        self.max_word_chars
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
