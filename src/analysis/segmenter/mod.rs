//! Dictionary-driven hashtag segmentation.
//!
//! [`HashtagSegmenter`] splits a concatenated hashtag body such as
//! `makeamericagreatagain` into dictionary words. Matching is longest-prefix
//! first and case-insensitive. When the body can be covered entirely by
//! dictionary words, the segmentation that picks the longest word at each
//! step among the full segmentations is returned; otherwise a greedy pass
//! consumes unmatched characters as unknown fragments.
//!
//! Fragments are slices of the input, so joining them always reproduces the
//! original string.
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::segmenter::{Dictionary, HashtagSegmenter};
//!
//! let dictionary = Dictionary::from_words(["make", "america", "great", "again"]);
//! let segmenter = HashtagSegmenter::new(dictionary);
//!
//! let words: Vec<&str> = segmenter
//!     .segment("MakeAmericaGreatAgain")
//!     .iter()
//!     .map(|s| s.text)
//!     .collect();
//! assert_eq!(words, vec!["Make", "America", "Great", "Again"]);
//! ```

pub mod dictionary;

pub use dictionary::Dictionary;

/// One fragment of a segmented word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The fragment, with the casing of the input.
    pub text: &'a str,
    /// Whether the fragment is a dictionary word.
    pub known: bool,
}

/// Splits words into dictionary words.
#[derive(Clone, Debug)]
pub struct HashtagSegmenter {
    dictionary: Dictionary,
}

impl HashtagSegmenter {
    /// Create a segmenter over the given dictionary.
    pub fn new(dictionary: Dictionary) -> Self {
        HashtagSegmenter { dictionary }
    }

    /// Get the underlying dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Segment `word` into fragments.
    pub fn segment<'a>(&self, word: &'a str) -> Vec<Segment<'a>> {
        if word.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, including the end.
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();

        match self.full_segmentation(word, &bounds) {
            Some(segments) => segments,
            None => self.greedy_segmentation(word, &bounds),
        }
    }

    /// Whether every fragment of `word` is a dictionary word.
    pub fn is_segmentable(&self, word: &str) -> bool {
        let segments = self.segment(word);
        !segments.is_empty() && segments.iter().all(|s| s.known)
    }

    /// Length in chars of the longest dictionary word starting at `start`
    /// whose end position satisfies `accept`.
    fn longest_prefix(
        &self,
        word: &str,
        bounds: &[usize],
        start: usize,
        accept: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let chars = bounds.len() - 1;
        let longest = self.dictionary.max_word_chars().min(chars - start);

        (1..=longest).rev().find(|&len| {
            accept(start + len)
                && self
                    .dictionary
                    .contains(&word[bounds[start]..bounds[start + len]])
        })
    }

    /// Cover `word` with dictionary words only, preferring the longest
    /// word at each position. Solved right to left so that each position
    /// knows whether the remainder can be completed.
    fn full_segmentation<'a>(&self, word: &'a str, bounds: &[usize]) -> Option<Vec<Segment<'a>>> {
        let chars = bounds.len() - 1;
        let mut reachable = vec![false; chars + 1];
        let mut choice = vec![0usize; chars];
        reachable[chars] = true;

        for start in (0..chars).rev() {
            if let Some(len) = self.longest_prefix(word, bounds, start, |end| reachable[end]) {
                reachable[start] = true;
                choice[start] = len;
            }
        }

        if !reachable[0] {
            return None;
        }

        let mut segments = Vec::new();
        let mut pos = 0;
        while pos < chars {
            let end = pos + choice[pos];
            segments.push(Segment {
                text: &word[bounds[pos]..bounds[end]],
                known: true,
            });
            pos = end;
        }
        Some(segments)
    }

    /// Left-to-right longest-prefix match. Characters that start no
    /// dictionary word are consumed one at a time and merged into a single
    /// unknown fragment.
    fn greedy_segmentation<'a>(&self, word: &'a str, bounds: &[usize]) -> Vec<Segment<'a>> {
        let chars = bounds.len() - 1;
        let mut segments: Vec<Segment<'a>> = Vec::new();
        let mut unknown_start: Option<usize> = None;
        let mut pos = 0;

        while pos < chars {
            match self.longest_prefix(word, bounds, pos, |_| true) {
                Some(len) => {
                    if let Some(start) = unknown_start.take() {
                        segments.push(Segment {
                            text: &word[bounds[start]..bounds[pos]],
                            known: false,
                        });
                    }
                    segments.push(Segment {
                        text: &word[bounds[pos]..bounds[pos + len]],
                        known: true,
                    });
                    pos += len;
                }
                None => {
                    unknown_start.get_or_insert(pos);
                    pos += 1;
                }
            }
        }

        if let Some(start) = unknown_start {
            segments.push(Segment {
                text: &word[bounds[start]..],
                known: false,
            });
        }
        segments
    }
}
