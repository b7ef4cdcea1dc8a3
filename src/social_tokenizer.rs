//! The social-media tokenizer.
//!
//! [`SocialTokenizer`] turns one configuration plus a set of collaborators
//! into a fixed [`PipelineAnalyzer`]:
//!
//! ```text
//! quotes → phrases → extra patterns → entities → emoji      (char filters)
//!   → word splitter
//!   → hashtag split → case → repeated chars → decontraction
//!   → punctuation → line breaks → non-Latin → stopwords → stem → n-grams
//! ```
//!
//! Stages whose option is off are not added. Building is comparatively
//! expensive; a tokenizer is cheap to clone and safe to share across threads.
//!
//! # Examples
//!
//! ```
//! use socialtok::config::TokenizerConfig;
//! use socialtok::social_tokenizer::SocialTokenizer;
//!
//! let config = TokenizerConfig {
//!     keepcaps: true,
//!     ..TokenizerConfig::default()
//! };
//! let tokenizer = SocialTokenizer::new(config).unwrap();
//!
//! assert_eq!(
//!     tokenizer.tokenize("Vladimir Putin is the BEST AND AMAZING").unwrap(),
//!     vec!["vladimir", "putin", "is", "the", "BEST", "AND", "AMAZING"]
//! );
//! ```

use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use log::debug;
use parking_lot::Mutex;
use rayon::ThreadPool;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{
    EmojiCharFilter, EntityCharFilter, PatternReplaceCharFilter, PhraseCharFilter,
    QuoteCharFilter,
};
use crate::analysis::emoji::EmojiLexicon;
use crate::analysis::patterns::PatternRegistry;
use crate::analysis::segmenter::{Dictionary, HashtagSegmenter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{
    BuiltinStopwords, CaseFilter, DecontractionFilter, HashtagSplitFilter, LineBreakFilter,
    NgramFilter, NonUnicodeFilter, PorterStemmer, PunctuationFilter, RepeatedCharFilter,
    StemFilter, Stemmer, StopFilter, StopwordSource,
};
use crate::analysis::tokenizer::SocialWordTokenizer;
use crate::batch::{BatchConfig, BatchTokenizer};
use crate::config::{StemOption, StopwordsOption, TokenizerConfig};
use crate::error::{Result, SocialtokError};
use crate::resolver::{CachingResolver, HttpResolver, UrlResolver};

/// Tokenizer for tweets, Reddit posts and similar user-generated text.
#[derive(Clone)]
pub struct SocialTokenizer {
    config: Arc<TokenizerConfig>,
    analyzer: Arc<PipelineAnalyzer>,
    /// Worker pools reused by `tokenize_many`, keyed by worker count.
    batch_pools: Arc<Mutex<AHashMap<usize, Arc<ThreadPool>>>>,
}

impl SocialTokenizer {
    /// Build a tokenizer with the default collaborators.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start a builder to inject collaborators.
    pub fn builder(config: TokenizerConfig) -> SocialTokenizerBuilder {
        SocialTokenizerBuilder::new(config)
    }

    /// Get the configuration this tokenizer was built with.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Get the underlying analysis pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Tokenize one document. An empty document yields no tokens.
    pub fn tokenize(&self, document: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(document)?.map(String::from).collect())
    }

    /// Tokenize raw bytes.
    ///
    /// Invalid UTF-8 is an encoding error, unless non-Latin removal is on; then
    /// the text is decoded lossily and the damaged words are dropped.
    pub fn tokenize_bytes(&self, document: &[u8]) -> Result<Vec<String>> {
        match std::str::from_utf8(document) {
            Ok(text) => self.tokenize(text),
            Err(e) if self.config.remove_nonunicode => {
                debug!("decoding invalid UTF-8 lossily: {e}");
                self.tokenize(&String::from_utf8_lossy(document))
            }
            Err(e) => Err(SocialtokError::encoding(format!(
                "document is not valid UTF-8: {e}"
            ))),
        }
    }

    /// Tokenize many documents in parallel. `output[i]` belongs to
    /// `documents[i]`.
    ///
    /// The worker pool for a given `workers` count is created on first use
    /// and shared by later calls and by clones of this tokenizer. Use a
    /// [`BatchTokenizer`] directly for cancellation, metrics or a different
    /// failure policy.
    pub fn tokenize_many<S>(
        &self,
        documents: &[S],
        batch_size: usize,
        workers: usize,
    ) -> Result<Vec<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        let config = BatchConfig {
            batch_size,
            workers,
            ..BatchConfig::default()
        };
        config.validate()?;

        let thread_pool = self.batch_pool(workers)?;
        BatchTokenizer::with_thread_pool(self.clone(), config, thread_pool)?.tokenize(documents)
    }

    fn batch_pool(&self, workers: usize) -> Result<Option<Arc<ThreadPool>>> {
        if workers <= 1 {
            return Ok(None);
        }

        let mut pools = self.batch_pools.lock();
        if let Some(pool) = pools.get(&workers) {
            return Ok(Some(Arc::clone(pool)));
        }

        let pool = BatchTokenizer::build_thread_pool(workers)?;
        if let Some(pool) = &pool {
            debug!("created batch pool with {workers} workers");
            pools.insert(workers, Arc::clone(pool));
        }
        Ok(pool)
    }
}

impl Analyzer for SocialTokenizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.analyzer.analyze(text)
    }

    fn name(&self) -> &'static str {
        "social"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for SocialTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialTokenizer")
            .field("stages", &self.analyzer.stage_names())
            .finish()
    }
}

/// Builder for [`SocialTokenizer`] that accepts the external collaborators.
pub struct SocialTokenizerBuilder {
    config: TokenizerConfig,
    stopwords: Arc<dyn StopwordSource>,
    stemmer: Arc<dyn Stemmer>,
    lemmatizer: Option<Arc<dyn Stemmer>>,
    emoji_lexicon: EmojiLexicon,
    dictionary: Option<Dictionary>,
    resolver: Option<Arc<dyn UrlResolver>>,
}

impl SocialTokenizerBuilder {
    /// Create a builder with the built-in collaborators.
    pub fn new(config: TokenizerConfig) -> Self {
        SocialTokenizerBuilder {
            config,
            stopwords: Arc::new(BuiltinStopwords),
            stemmer: Arc::new(PorterStemmer::new()),
            lemmatizer: None,
            emoji_lexicon: EmojiLexicon::new(),
            dictionary: None,
            resolver: None,
        }
    }

    /// Source of stop word lists for `ignorestopwords = "<language>"`.
    pub fn with_stopwords(mut self, source: Arc<dyn StopwordSource>) -> Self {
        self.stopwords = source;
        self
    }

    /// Stemmer used for `stem = "stem"`.
    pub fn with_stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stemmer = stemmer;
        self
    }

    /// Lemmatizer used for `stem = "lemm"`.
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Stemmer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Emoji polarity lexicon.
    pub fn with_emoji_lexicon(mut self, lexicon: EmojiLexicon) -> Self {
        self.emoji_lexicon = lexicon;
        self
    }

    /// Word list for hashtag segmentation. Takes precedence over
    /// `hashtag_dictionary`.
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// URL resolver for the network URL modes. Without one, a cached HTTP
    /// resolver is created when such a mode is configured.
    pub fn with_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the tokenizer, rejecting conflicting options.
    pub fn build(self) -> Result<SocialTokenizer> {
        let patterns = PatternRegistry::compile(&self.config)?;
        let config = &self.config;

        let tokenizer = Arc::new(SocialWordTokenizer::new(&patterns));
        let mut analyzer = PipelineAnalyzer::new(tokenizer).with_name("social");

        // Char filters
        let quotes =
            QuoteCharFilter::new(&patterns, config.ignorequotes, config.ignore_reddit_quotes);
        if quotes.is_enabled() {
            analyzer = analyzer.add_char_filter(Arc::new(quotes));
        }

        let phrases = PhraseCharFilter::new(patterns.phrases.clone());
        if !phrases.is_empty() {
            analyzer = analyzer.add_char_filter(Arc::new(phrases));
        }

        for extra in patterns.extra.iter().cloned() {
            analyzer = analyzer.add_char_filter(Arc::new(PatternReplaceCharFilter::from(extra)));
        }

        let resolver = self.url_resolver()?;
        analyzer = analyzer.add_char_filter(Arc::new(EntityCharFilter::new(
            &patterns, config, resolver,
        )?));

        if config.classifies_emoji() {
            analyzer = analyzer.add_char_filter(Arc::new(EmojiCharFilter::new(
                self.emoji_lexicon.clone(),
                config.pos_emojis,
                config.neg_emojis,
                config.neutral_emojis,
            )));
        }

        // Token filters
        if config.splithashtags {
            let segmenter = HashtagSegmenter::new(self.hashtag_dictionary()?);
            analyzer = analyzer.add_filter(Arc::new(HashtagSplitFilter::new(segmenter)));
        }

        if config.lowercase {
            analyzer = analyzer.add_filter(Arc::new(CaseFilter::new().keep_caps(config.keepcaps)));
        }

        if let Some(threshold) = config.normalize_threshold() {
            analyzer = analyzer.add_filter(Arc::new(RepeatedCharFilter::new(threshold)));
        }

        if config.decontract {
            analyzer = analyzer.add_filter(Arc::new(DecontractionFilter::new()));
        }

        if config.removepunct {
            analyzer = analyzer.add_filter(Arc::new(PunctuationFilter::new()));
        }

        if config.removebreaks {
            analyzer = analyzer.add_filter(Arc::new(LineBreakFilter::new()));
        }

        if config.remove_nonunicode {
            analyzer = analyzer.add_filter(Arc::new(NonUnicodeFilter::new(
                patterns.non_latin.clone(),
            )));
        }

        if let Some(stop) = self.stop_filter()? {
            analyzer = analyzer.add_filter(Arc::new(stop));
        }

        if let Some(stem) = self.stem_filter()? {
            analyzer = analyzer.add_filter(Arc::new(stem));
        }

        if config.ngrams > 1 {
            analyzer = analyzer.add_filter(Arc::new(NgramFilter::new(config.ngrams)?));
        }

        debug!("built social tokenizer with stages {:?}", analyzer.stage_names());

        Ok(SocialTokenizer {
            config: Arc::new(self.config),
            analyzer: Arc::new(analyzer),
            batch_pools: Arc::new(Mutex::new(AHashMap::new())),
        })
    }

    fn url_resolver(&self) -> Result<Option<Arc<dyn UrlResolver>>> {
        if let Some(resolver) = &self.resolver {
            return Ok(Some(Arc::clone(resolver)));
        }
        if !self.config.urls.needs_network() {
            return Ok(None);
        }

        let timeout = Duration::from_millis(self.config.network_timeout_ms);
        let http = HttpResolver::new(timeout)?;
        debug!("created HTTP resolver with timeout {timeout:?}");
        Ok(Some(Arc::new(CachingResolver::new(http))))
    }

    fn hashtag_dictionary(&self) -> Result<Dictionary> {
        if let Some(dictionary) = &self.dictionary {
            return Ok(dictionary.clone());
        }
        match &self.config.hashtag_dictionary {
            Some(path) => Dictionary::from_file(path),
            None => Err(SocialtokError::configuration(
                "splithashtags needs a dictionary: inject one or set hashtag_dictionary",
            )),
        }
    }

    fn stop_filter(&self) -> Result<Option<StopFilter>> {
        match &self.config.ignorestopwords {
            StopwordsOption::None => Ok(None),
            StopwordsOption::Language(language) => {
                StopFilter::for_language(self.stopwords.as_ref(), language).map(Some)
            }
            StopwordsOption::Words(words) => Ok(Some(StopFilter::from_words(words.clone()))),
        }
    }

    fn stem_filter(&self) -> Result<Option<StemFilter>> {
        match self.config.stem {
            StemOption::None => Ok(None),
            StemOption::Stem => Ok(Some(StemFilter::with_stemmer(Arc::clone(&self.stemmer)))),
            StemOption::Lemm => {
                let lemmatizer = self.lemmatizer.as_ref().ok_or_else(|| {
                    SocialtokError::configuration("stem = \"lemm\" needs an injected lemmatizer")
                })?;
                Ok(Some(StemFilter::with_stemmer(Arc::clone(lemmatizer))))
            }
        }
    }
}

impl std::fmt::Debug for SocialTokenizerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialTokenizerBuilder")
            .field("config", &self.config)
            .field("stopwords", &self.stopwords.name())
            .field("stemmer", &self.stemmer.name())
            .field("lemmatizer", &self.lemmatizer.as_ref().map(|l| l.name()))
            .field("dictionary_words", &self.dictionary.as_ref().map(Dictionary::len))
            .field("resolver", &self.resolver.as_ref().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::LookupLemmatizer;
    use crate::config::{EntityAction, ExtraPattern};

    fn tokenize(config: TokenizerConfig, text: &str) -> Vec<String> {
        SocialTokenizer::new(config).unwrap().tokenize(text).unwrap()
    }

    #[test]
    fn test_default_config() {
        assert_eq!(
            tokenize(TokenizerConfig::default(), "Hello, World!!!"),
            vec!["hello", "world"]
        );
        assert!(tokenize(TokenizerConfig::default(), "").is_empty());
        assert!(tokenize(TokenizerConfig::default(), " ?!... ").is_empty());
    }

    #[test]
    fn test_decontract() {
        let config = TokenizerConfig {
            decontract: true,
            ..TokenizerConfig::default()
        };
        assert_eq!(
            tokenize(
                config,
                "I've been waiting to drink this beer! I won't give it to you"
            ),
            vec![
                "i", "have", "been", "waiting", "to", "drink", "this", "beer", "i", "will",
                "not", "give", "it", "to", "you"
            ]
        );
    }

    #[test]
    fn test_stem() {
        let config = TokenizerConfig {
            stem: StemOption::Stem,
            ..TokenizerConfig::default()
        };
        assert_eq!(
            tokenize(config, "who has stolen my vodka friends"),
            vec!["who", "ha", "stolen", "my", "vodka", "friend"]
        );
    }

    #[test]
    fn test_splithashtags_uses_injected_dictionary() {
        let config = TokenizerConfig {
            splithashtags: true,
            ..TokenizerConfig::default()
        };
        let tokenizer = SocialTokenizer::builder(config)
            .with_dictionary(Dictionary::from_words(["make", "america", "great", "again"]))
            .build()
            .unwrap();

        assert_eq!(
            tokenizer.tokenize("#makeamericagreatagain").unwrap(),
            vec!["make", "america", "great", "again"]
        );
    }

    #[test]
    fn test_splithashtags_without_dictionary_is_rejected() {
        let config = TokenizerConfig {
            splithashtags: true,
            ..TokenizerConfig::default()
        };
        assert!(matches!(
            SocialTokenizer::new(config),
            Err(SocialtokError::Configuration(_))
        ));
    }

    #[test]
    fn test_splithashtags_conflicts_with_hashtag_replacement() {
        let config = TokenizerConfig {
            splithashtags: true,
            hashtags: EntityAction::replace("HASHTAG"),
            ..TokenizerConfig::default()
        };
        let result = SocialTokenizer::builder(config)
            .with_dictionary(Dictionary::from_words(["beer"]))
            .build();
        assert!(matches!(result, Err(SocialtokError::Configuration(_))));
    }

    #[test]
    fn test_lemm_requires_lemmatizer() {
        let config = TokenizerConfig {
            stem: StemOption::Lemm,
            ..TokenizerConfig::default()
        };
        assert!(SocialTokenizer::new(config.clone()).is_err());

        let tokenizer = SocialTokenizer::builder(config)
            .with_lemmatizer(Arc::new(LookupLemmatizer::from_pairs([("geese", "goose")])))
            .build()
            .unwrap();
        assert_eq!(tokenizer.tokenize("Geese fly").unwrap(), vec!["goose", "fly"]);
    }

    #[test]
    fn test_unknown_stopword_language() {
        let config = TokenizerConfig {
            ignorestopwords: StopwordsOption::Language("klingon".to_string()),
            ..TokenizerConfig::default()
        };
        assert!(matches!(
            SocialTokenizer::new(config),
            Err(SocialtokError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_extra_pattern() {
        let config = TokenizerConfig {
            extra_patterns: vec![ExtraPattern::new("broken", "(unclosed", "X")],
            ..TokenizerConfig::default()
        };
        let err = SocialTokenizer::new(config).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_tokenize_bytes() {
        let tokenizer = SocialTokenizer::new(TokenizerConfig::default()).unwrap();
        assert_eq!(tokenizer.tokenize_bytes(b"cold beer").unwrap(), vec!["cold", "beer"]);
        assert!(matches!(
            tokenizer.tokenize_bytes(b"cold \xff\xfe beer"),
            Err(SocialtokError::Encoding(_))
        ));

        let lossy = SocialTokenizer::new(TokenizerConfig {
            remove_nonunicode: true,
            ..TokenizerConfig::default()
        })
        .unwrap();
        assert_eq!(
            lossy.tokenize_bytes(b"cold \xff\xfe beer").unwrap(),
            vec!["cold", "beer"]
        );
    }

    #[test]
    fn test_repeated_calls_share_one_instance() {
        let tokenizer = SocialTokenizer::new(TokenizerConfig::default()).unwrap();
        for _ in 0..3 {
            assert_eq!(tokenizer.tokenize("sooooo good").unwrap(), vec!["sooo", "good"]);
        }
    }

    #[test]
    fn test_tokenize_many_reuses_pools() {
        let tokenizer = SocialTokenizer::new(TokenizerConfig::default()).unwrap();
        let docs = vec!["one beer", "two beers", "three beers"];

        let first = tokenizer.tokenize_many(&docs, 1, 2).unwrap();
        let second = tokenizer.clone().tokenize_many(&docs, 2, 2).unwrap();
        tokenizer.tokenize_many(&docs, 1, 1).unwrap();

        assert_eq!(first, second);
        assert_eq!(tokenizer.batch_pools.lock().len(), 1);

        tokenizer.tokenize_many(&docs, 1, 3).unwrap();
        assert_eq!(tokenizer.batch_pools.lock().len(), 2);
    }

    #[test]
    fn test_debug_lists_stages() {
        let tokenizer = SocialTokenizer::new(TokenizerConfig::default()).unwrap();
        let debug = format!("{tokenizer:?}");
        assert!(debug.contains("entity"));
        assert!(debug.contains("social_word"));
        assert!(debug.contains("case"));
    }
}
