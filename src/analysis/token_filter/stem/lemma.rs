//! Table-driven lemmatizer.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::token_filter::stem::Stemmer;
use crate::error::{Result, SocialtokError};

/// Maps inflected forms to lemmas through a lookup table.
///
/// Unknown words are returned lower-cased and otherwise unchanged.
#[derive(Clone, Debug, Default)]
pub struct LookupLemmatizer {
    lemmas: Arc<AHashMap<String, String>>,
}

impl LookupLemmatizer {
    /// Build a lemmatizer from `(form, lemma)` pairs.
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: Into<String>,
    {
        let lemmas = pairs
            .into_iter()
            .map(|(form, lemma)| (form.as_ref().to_lowercase(), lemma.into()))
            .collect();
        LookupLemmatizer {
            lemmas: Arc::new(lemmas),
        }
    }

    /// Load a tab-separated `form<TAB>lemma` file. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut pairs = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (form, lemma) = line.split_once('\t').ok_or_else(|| {
                SocialtokError::configuration(format!(
                    "{}:{}: expected 'form<TAB>lemma'",
                    path.display(),
                    line_no + 1
                ))
            })?;
            pairs.push((form.trim().to_string(), lemma.trim().to_string()));
        }

        Ok(Self::from_pairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Stemmer for LookupLemmatizer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        match self.lemmas.get(&lower) {
            Some(lemma) => lemma.clone(),
            None => lower,
        }
    }

    fn name(&self) -> &'static str {
        "lookup_lemmatizer"
    }
}
