use regex::{NoExpand, Regex};

use super::{CharFilter, map_free_segments, placeholder};
use crate::analysis::patterns::CompiledExtraPattern;
use crate::error::{Result, SocialtokError};

/// A char filter that replaces every match of a user pattern with a
/// placeholder token, or deletes it when the replacement is empty.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    label: String,
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(label: &str, pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            label: label.to_string(),
            pattern: Regex::new(pattern).map_err(|e| {
                SocialtokError::configuration(format!("invalid extra pattern '{label}': {e}"))
            })?,
            replacement: replacement.to_string(),
        })
    }

    /// Label of the rule this filter applies.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<CompiledExtraPattern> for PatternReplaceCharFilter {
    fn from(extra: CompiledExtraPattern) -> Self {
        PatternReplaceCharFilter {
            label: extra.label,
            pattern: extra.regex,
            replacement: extra.replacement,
        }
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        let substitute = placeholder(&self.replacement);
        map_free_segments(input, |free| {
            self.pattern
                .replace_all(free, NoExpand(&substitute))
                .into_owned()
        })
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
