//! Porter stemming algorithm implementation.
//!
//! The stemmer applies the five rewrite steps of the original algorithm:
//! 1. Plurals, -ed/-ing suffixes and terminal y
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! Only ASCII words are stemmed; anything else is returned lower-cased.
//!
//! # Examples
//!
//! ```
//! use socialtok::analysis::token_filter::stem::Stemmer;
//! use socialtok::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("friends"), "friend");
//! assert_eq!(stemmer.stem("has"), "ha");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[(&str, &str)] = &[
    ("al", ""),
    ("ance", ""),
    ("ence", ""),
    ("er", ""),
    ("ic", ""),
    ("able", ""),
    ("ible", ""),
    ("ant", ""),
    ("ement", ""),
    ("ment", ""),
    ("ent", ""),
    ("ion", ""),
    ("ou", ""),
    ("ism", ""),
    ("ate", ""),
    ("iti", ""),
    ("ous", ""),
    ("ive", ""),
    ("ize", ""),
];

/// Porter stemming algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in `word`.
fn measure(word: &[u8]) -> usize {
    let n = word.len();
    let mut i = 0;
    let mut m = 0;

    while i < n && is_consonant(word, i) {
        i += 1;
    }
    loop {
        while i < n && !is_consonant(word, i) {
            i += 1;
        }
        if i >= n {
            return m;
        }
        m += 1;
        while i < n && is_consonant(word, i) {
            i += 1;
        }
    }
}

fn has_vowel(word: &[u8]) -> bool {
    (0..word.len()).any(|i| !is_consonant(word, i))
}

fn ends_double_consonant(word: &[u8]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

fn ends_cvc(word: &[u8]) -> bool {
    let n = word.len();
    n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], b'w' | b'x' | b'y')
}

fn stem_of<'a>(word: &'a [u8], suffix: &str) -> Option<&'a [u8]> {
    word.strip_suffix(suffix.as_bytes())
}

/// Longest suffix from `rules` that `word` ends with.
fn longest_rule(word: &[u8], rules: &'static [(&'static str, &'static str)]) -> Option<(usize, &'static str)> {
    rules
        .iter()
        .filter(|(suffix, _)| word.ends_with(suffix.as_bytes()))
        .max_by_key(|(suffix, _)| suffix.len())
        .map(|&(suffix, replacement)| (word.len() - suffix.len(), replacement))
}

fn step1a(word: &mut Vec<u8>) {
    if word.ends_with(b"sses") || word.ends_with(b"ies") {
        word.truncate(word.len() - 2);
    } else if word.ends_with(b"s") && !word.ends_with(b"ss") {
        word.pop();
    }
}

fn step1b(word: &mut Vec<u8>) {
    if let Some(stem) = stem_of(word, "eed") {
        if measure(stem) > 0 {
            word.pop();
        }
        return;
    }

    let stripped = ["ed", "ing"].iter().find_map(|suffix| {
        stem_of(word.as_slice(), suffix)
            .filter(|stem| has_vowel(stem))
            .map(<[u8]>::len)
    });
    let Some(len) = stripped else {
        return;
    };
    word.truncate(len);

    if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
        word.push(b'e');
    } else if ends_double_consonant(word) && !matches!(word.last(), Some(b'l' | b's' | b'z')) {
        word.pop();
    } else if measure(word) == 1 && ends_cvc(word) {
        word.push(b'e');
    }
}

fn step1c(word: &mut Vec<u8>) {
    if let Some(stem) = stem_of(word, "y") {
        if has_vowel(stem) {
            let n = word.len();
            word[n - 1] = b'i';
        }
    }
}

fn apply_rules(word: &mut Vec<u8>, rules: &'static [(&'static str, &'static str)], min_measure: usize) {
    if let Some((stem_len, replacement)) = longest_rule(word, rules) {
        if measure(&word[..stem_len]) >= min_measure {
            word.truncate(stem_len);
            word.extend_from_slice(replacement.as_bytes());
        }
    }
}

fn step4(word: &mut Vec<u8>) {
    if let Some((stem_len, _)) = longest_rule(word, STEP4_SUFFIXES) {
        let stem = &word[..stem_len];
        let is_ion = word.ends_with(b"ion");
        if measure(stem) > 1 && (!is_ion || matches!(stem.last(), Some(b's' | b't'))) {
            word.truncate(stem_len);
        }
    }
}

fn step5(word: &mut Vec<u8>) {
    if let Some(stem) = stem_of(word, "e") {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            word.pop();
        }
    }

    if word.ends_with(b"ll") && measure(word) > 1 {
        word.pop();
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.len() <= 2 || !lower.bytes().all(|b| b.is_ascii_alphabetic()) {
            return lower;
        }

        let mut bytes = lower.into_bytes();
        step1a(&mut bytes);
        step1b(&mut bytes);
        step1c(&mut bytes);
        apply_rules(&mut bytes, STEP2_SUFFIXES, 1);
        apply_rules(&mut bytes, STEP3_SUFFIXES, 1);
        step4(&mut bytes);
        step5(&mut bytes);

        // Only ASCII letters were edited.
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
