//! Emoji classification.

use unicode_segmentation::UnicodeSegmentation;

use super::{CharFilter, map_free_segments, placeholder};
use crate::analysis::emoji::{EmojiLexicon, Polarity};

/// Replaces emoji of the enabled polarity classes with `POS_EMOJI`,
/// `NEG_EMOJI` or `NEUTRAL_EMOJI` placeholders.
///
/// Works on extended grapheme clusters, so a ZWJ sequence or an emoji with a
/// skin-tone modifier is classified as one unit. Emoji the lexicon does not
/// know, or whose class is disabled, are left in place.
#[derive(Clone, Debug)]
pub struct EmojiCharFilter {
    lexicon: EmojiLexicon,
    positive: bool,
    negative: bool,
    neutral: bool,
}

impl EmojiCharFilter {
    pub fn new(lexicon: EmojiLexicon, positive: bool, negative: bool, neutral: bool) -> Self {
        EmojiCharFilter {
            lexicon,
            positive,
            negative,
            neutral,
        }
    }

    fn enabled(&self, polarity: Polarity) -> bool {
        match polarity {
            Polarity::Positive => self.positive,
            Polarity::Negative => self.negative,
            Polarity::Neutral => self.neutral,
        }
    }

    fn classify_segment(&self, segment: &str) -> String {
        if segment.is_ascii() {
            return segment.to_string();
        }

        let mut output = String::with_capacity(segment.len());
        for grapheme in segment.graphemes(true) {
            match self.lexicon.classify(grapheme) {
                Some(polarity) if self.enabled(polarity) => {
                    output.push_str(&placeholder(polarity.placeholder()))
                }
                _ => output.push_str(grapheme),
            }
        }
        output
    }
}

impl CharFilter for EmojiCharFilter {
    fn filter(&self, input: &str) -> String {
        map_free_segments(input, |free| self.classify_segment(free))
    }

    fn name(&self) -> &'static str {
        "emoji"
    }
}
