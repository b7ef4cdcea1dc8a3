//! Hashtag segmentation filter.

use crate::analysis::segmenter::HashtagSegmenter;
use crate::analysis::token::{Token, TokenKind, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Replaces each hashtag token with the dictionary words it is made of.
///
/// The `#` is dropped. A hashtag that cannot be covered by dictionary words
/// becomes a single word holding its body (`#MAGA` → `MAGA`).
#[derive(Clone, Debug)]
pub struct HashtagSplitFilter {
    segmenter: HashtagSegmenter,
}

impl HashtagSplitFilter {
    pub fn new(segmenter: HashtagSegmenter) -> Self {
        HashtagSplitFilter { segmenter }
    }
}

impl Filter for HashtagSplitFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut split = Vec::new();

        for token in tokens {
            if token.kind != TokenKind::Hashtag {
                split.push(token);
                continue;
            }

            let body = token.text.strip_prefix('#').unwrap_or(&token.text);
            if body.is_empty() {
                continue;
            }

            let segments = self.segmenter.segment(body);
            if segments.iter().all(|s| s.known) {
                split.extend(segments.iter().map(|s| Token::word(s.text)));
            } else {
                split.push(Token::word(body));
            }
        }

        Ok(Box::new(split.into_iter()))
    }

    fn name(&self) -> &'static str {
        "hashtag_split"
    }
}
