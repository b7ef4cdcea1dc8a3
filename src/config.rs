//! Tokenizer configuration.
//!
//! [`TokenizerConfig`] is a plain value: every option is an explicit field with
//! a documented default, and it can be loaded from JSON. A tokenizer copies its
//! configuration at construction time; to change behavior, build a new
//! tokenizer.
//!
//! Entity options follow the conventions of the JSON form:
//!
//! | JSON value | Meaning |
//! |---|---|
//! | `false` / `null` | leave the entity untouched |
//! | `""` | delete the entity |
//! | `"label"` | replace the entity with the placeholder `label` |
//!
//! # Examples
//!
//! ```
//! use socialtok::config::{EntityAction, TokenizerConfig, UrlMode};
//!
//! let config = TokenizerConfig::from_json_str(
//!     r#"{ "urls": "domain", "twitter_handles": "HANDLE", "numbers": "" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.urls, UrlMode::Domain);
//! assert_eq!(config.twitter_handles, EntityAction::Replace("HANDLE".to_string()));
//! assert_eq!(config.numbers, EntityAction::Remove);
//! assert!(config.lowercase);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SocialtokError};

/// What to do with a detected entity (handle, hashtag, number, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "OptionRepr", into = "OptionRepr")]
pub enum EntityAction {
    /// Leave the matched text in place.
    #[default]
    Keep,
    /// Delete the matched text.
    Remove,
    /// Replace the matched text with a placeholder token.
    Replace(String),
}

impl EntityAction {
    /// Create a replacement action.
    pub fn replace<S: Into<String>>(label: S) -> Self {
        let label = label.into();
        if label.is_empty() {
            EntityAction::Remove
        } else {
            EntityAction::Replace(label)
        }
    }

    /// Whether this action rewrites the matched text.
    pub fn is_active(&self) -> bool {
        !matches!(self, EntityAction::Keep)
    }
}

/// How URLs are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "OptionRepr", into = "OptionRepr")]
pub enum UrlMode {
    /// Leave URLs in place as single tokens.
    #[default]
    Keep,
    /// Delete URLs.
    Remove,
    /// Replace URLs with a placeholder token.
    Replace(String),
    /// Replace URLs with their registrable domain (`cnn`, `rt`).
    Domain,
    /// Follow redirects to the final location, then apply [`UrlMode::Domain`].
    DomainUnwrap,
    /// Like [`UrlMode::DomainUnwrap`], resolved with a lighter HEAD request.
    DomainUnwrapFast,
    /// Replace URLs with the first word of the page title.
    Title,
}

impl UrlMode {
    /// Whether this mode needs a URL resolver.
    pub fn needs_network(&self) -> bool {
        matches!(
            self,
            UrlMode::DomainUnwrap | UrlMode::DomainUnwrapFast | UrlMode::Title
        )
    }
}

/// Stopword removal policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "StopwordsRepr", into = "StopwordsRepr")]
pub enum StopwordsOption {
    /// Keep every token.
    #[default]
    None,
    /// Use the stopword list registered for a language (`english`, `russian`).
    Language(String),
    /// Use an explicit list of words.
    Words(Vec<String>),
}

/// Stemming policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "OptionRepr", into = "OptionRepr")]
pub enum StemOption {
    /// No stemming.
    #[default]
    None,
    /// Suffix-stripping stemmer (Porter by default).
    Stem,
    /// Dictionary lemmatizer; must be injected into the builder.
    Lemm,
}

/// A user-supplied rule applied before the built-in entity rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPattern {
    /// Name of the rule, used in logs and error messages.
    pub label: String,
    /// Regular expression to match.
    pub pattern: String,
    /// Placeholder inserted for every match; empty deletes the match.
    pub replacement: String,
}

impl ExtraPattern {
    /// Create a new extra pattern.
    pub fn new<L, P, R>(label: L, pattern: P, replacement: R) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        R: Into<String>,
    {
        ExtraPattern {
            label: label.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Full configuration of a social-media tokenizer.
///
/// Unknown JSON keys are rejected, so a misspelled option is an error
/// rather than a silently ignored setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Lower-case tokens.
    pub lowercase: bool,
    /// With `lowercase`, keep all-caps words verbatim.
    pub keepcaps: bool,
    /// Collapse letter runs longer than this to exactly this many; `None` or 0 disables.
    /// JSON accepts a number, `false` or `null`.
    #[serde(deserialize_with = "deserialize_normalize")]
    pub normalize: Option<usize>,
    /// Drop double-quoted spans.
    pub ignorequotes: bool,
    /// Drop lines starting with `>`.
    pub ignore_reddit_quotes: bool,
    /// Stopword removal.
    pub ignorestopwords: StopwordsOption,
    /// Stemming or lemmatization.
    pub stem: StemOption,
    /// Drop punctuation tokens and strip punctuation around words.
    pub removepunct: bool,
    /// Treat line breaks as plain whitespace.
    pub removebreaks: bool,
    /// Drop tokens with characters outside the Latin scripts.
    pub remove_nonunicode: bool,
    /// Expand English contractions.
    pub decontract: bool,
    /// Split hashtags into dictionary words.
    pub splithashtags: bool,
    /// Hashtag rewriting.
    pub hashtags: EntityAction,
    /// URL rewriting.
    pub urls: UrlMode,
    /// Standalone number rewriting.
    pub numbers: EntityAction,
    /// `@handle` rewriting.
    pub twitter_handles: EntityAction,
    /// `/r/subreddit` rewriting.
    pub subreddits: EntityAction,
    /// `u/username` rewriting.
    pub reddit_usernames: EntityAction,
    /// Email rewriting.
    pub emails: EntityAction,
    /// Custom rules, applied in order before the built-in ones.
    pub extra_patterns: Vec<ExtraPattern>,
    /// Replace positive emoji with `POS_EMOJI`.
    pub pos_emojis: bool,
    /// Replace negative emoji with `NEG_EMOJI`.
    pub neg_emojis: bool,
    /// Replace neutral emoji with `NEUTRAL_EMOJI`.
    pub neutral_emojis: bool,
    /// Multi-word phrases kept as single tokens.
    pub keep_untokenized: Vec<String>,
    /// Join kept phrases with `_` instead of a space.
    pub whitespaces_to_underscores: bool,
    /// Append n-grams up to this order to the output.
    pub ngrams: usize,
    /// Placeholder used when a URL cannot be resolved.
    pub url_fallback: String,
    /// Timeout for a single URL resolution, in milliseconds.
    pub network_timeout_ms: u64,
    /// Word-frequency file used for hashtag segmentation.
    pub hashtag_dictionary: Option<PathBuf>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            lowercase: true,
            keepcaps: false,
            normalize: Some(3),
            ignorequotes: false,
            ignore_reddit_quotes: false,
            ignorestopwords: StopwordsOption::None,
            stem: StemOption::None,
            removepunct: true,
            removebreaks: true,
            remove_nonunicode: false,
            decontract: false,
            splithashtags: false,
            hashtags: EntityAction::Keep,
            urls: UrlMode::Keep,
            numbers: EntityAction::Keep,
            twitter_handles: EntityAction::Keep,
            subreddits: EntityAction::Keep,
            reddit_usernames: EntityAction::Keep,
            emails: EntityAction::Keep,
            extra_patterns: Vec::new(),
            pos_emojis: false,
            neg_emojis: false,
            neutral_emojis: false,
            keep_untokenized: Vec::new(),
            whitespaces_to_underscores: true,
            ngrams: 1,
            url_fallback: "URL".to_string(),
            network_timeout_ms: 5_000,
            hashtag_dictionary: None,
        }
    }
}

impl TokenizerConfig {
    /// Parse a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective repeated-character threshold.
    pub fn normalize_threshold(&self) -> Option<usize> {
        self.normalize.filter(|&n| n > 0)
    }

    /// Whether any emoji class is replaced.
    pub fn classifies_emoji(&self) -> bool {
        self.pos_emojis || self.neg_emojis || self.neutral_emojis
    }

    /// Reject option combinations that cannot be honored together.
    ///
    /// Checks that depend on injected collaborators (stopword languages,
    /// lemmatizer, dictionary) happen in the tokenizer builder.
    pub fn validate(&self) -> Result<()> {
        if self.splithashtags && self.hashtags.is_active() {
            return Err(SocialtokError::configuration(
                "splithashtags requires hashtags to be left in place (hashtags = false)",
            ));
        }

        if self.ngrams == 0 {
            return Err(SocialtokError::configuration("ngrams must be at least 1"));
        }

        if self.url_fallback.is_empty() {
            return Err(SocialtokError::configuration(
                "url_fallback must be a non-empty placeholder",
            ));
        }

        if self.urls.needs_network() && self.network_timeout_ms == 0 {
            return Err(SocialtokError::configuration(
                "network_timeout_ms must be positive when URLs are resolved",
            ));
        }

        for phrase in &self.keep_untokenized {
            if phrase.trim().is_empty() {
                return Err(SocialtokError::configuration(
                    "keep_untokenized phrases must not be blank",
                ));
            }
        }

        for extra in &self.extra_patterns {
            if extra.pattern.is_empty() {
                return Err(SocialtokError::configuration(format!(
                    "extra pattern '{}' has an empty pattern",
                    extra.label
                )));
            }
        }

        Ok(())
    }
}

/// JSON shape of the `normalize` option.
#[derive(Deserialize)]
#[serde(untagged)]
enum NormalizeRepr {
    Flag(bool),
    Threshold(usize),
    Unset,
}

fn deserialize_normalize<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match NormalizeRepr::deserialize(deserializer)? {
        NormalizeRepr::Flag(false) | NormalizeRepr::Unset | NormalizeRepr::Threshold(0) => Ok(None),
        NormalizeRepr::Threshold(n) => Ok(Some(n)),
        NormalizeRepr::Flag(true) => Err(D::Error::custom(
            "normalize expects false, null or a repetition threshold, found true",
        )),
    }
}

/// JSON shape shared by the entity, URL and stem options.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OptionRepr {
    Flag(bool),
    Label(String),
    Unset,
}

impl TryFrom<OptionRepr> for EntityAction {
    type Error = String;

    fn try_from(repr: OptionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            OptionRepr::Flag(false) | OptionRepr::Unset => Ok(EntityAction::Keep),
            OptionRepr::Flag(true) => {
                Err("expected false, \"\" or a replacement string, found true".to_string())
            }
            OptionRepr::Label(label) => Ok(EntityAction::replace(label)),
        }
    }
}

impl From<EntityAction> for OptionRepr {
    fn from(action: EntityAction) -> Self {
        match action {
            EntityAction::Keep => OptionRepr::Flag(false),
            EntityAction::Remove => OptionRepr::Label(String::new()),
            EntityAction::Replace(label) => OptionRepr::Label(label),
        }
    }
}

impl TryFrom<OptionRepr> for UrlMode {
    type Error = String;

    fn try_from(repr: OptionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            OptionRepr::Label(label) => Ok(match label.as_str() {
                "domain" => UrlMode::Domain,
                "domain_unwrap" => UrlMode::DomainUnwrap,
                "domain_unwrap_fast" => UrlMode::DomainUnwrapFast,
                "title" => UrlMode::Title,
                "" => UrlMode::Remove,
                _ => UrlMode::Replace(label),
            }),
            other => Ok(match EntityAction::try_from(other)? {
                EntityAction::Keep => UrlMode::Keep,
                EntityAction::Remove => UrlMode::Remove,
                EntityAction::Replace(label) => UrlMode::Replace(label),
            }),
        }
    }
}

impl From<UrlMode> for OptionRepr {
    fn from(mode: UrlMode) -> Self {
        match mode {
            UrlMode::Keep => OptionRepr::Flag(false),
            UrlMode::Remove => OptionRepr::Label(String::new()),
            UrlMode::Replace(label) => OptionRepr::Label(label),
            UrlMode::Domain => OptionRepr::Label("domain".to_string()),
            UrlMode::DomainUnwrap => OptionRepr::Label("domain_unwrap".to_string()),
            UrlMode::DomainUnwrapFast => OptionRepr::Label("domain_unwrap_fast".to_string()),
            UrlMode::Title => OptionRepr::Label("title".to_string()),
        }
    }
}

impl TryFrom<OptionRepr> for StemOption {
    type Error = String;

    fn try_from(repr: OptionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            OptionRepr::Flag(false) | OptionRepr::Unset => Ok(StemOption::None),
            OptionRepr::Label(label) => match label.as_str() {
                "stem" => Ok(StemOption::Stem),
                "lemm" => Ok(StemOption::Lemm),
                other => Err(format!("unknown stem mode '{other}'")),
            },
            OptionRepr::Flag(true) => Err("expected false, \"stem\" or \"lemm\"".to_string()),
        }
    }
}

impl From<StemOption> for OptionRepr {
    fn from(option: StemOption) -> Self {
        match option {
            StemOption::None => OptionRepr::Flag(false),
            StemOption::Stem => OptionRepr::Label("stem".to_string()),
            StemOption::Lemm => OptionRepr::Label("lemm".to_string()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StopwordsRepr {
    Flag(bool),
    Language(String),
    Words(Vec<String>),
    Unset,
}

impl TryFrom<StopwordsRepr> for StopwordsOption {
    type Error = String;

    fn try_from(repr: StopwordsRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            StopwordsRepr::Flag(false) | StopwordsRepr::Unset => Ok(StopwordsOption::None),
            StopwordsRepr::Flag(true) => {
                Err("expected false, a language name or a list of words".to_string())
            }
            StopwordsRepr::Language(language) => Ok(StopwordsOption::Language(language)),
            StopwordsRepr::Words(words) => Ok(StopwordsOption::Words(words)),
        }
    }
}

impl From<StopwordsOption> for StopwordsRepr {
    fn from(option: StopwordsOption) -> Self {
        match option {
            StopwordsOption::None => StopwordsRepr::Flag(false),
            StopwordsOption::Language(language) => StopwordsRepr::Language(language),
            StopwordsOption::Words(words) => StopwordsRepr::Words(words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert!(config.lowercase);
        assert!(!config.keepcaps);
        assert_eq!(config.normalize_threshold(), Some(3));
        assert!(config.removepunct);
        assert!(config.removebreaks);
        assert_eq!(config.urls, UrlMode::Keep);
        assert_eq!(config.hashtags, EntityAction::Keep);
        assert_eq!(config.ngrams, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_entity_action_json_forms() {
        let config = TokenizerConfig::from_json_str(
            r#"{
                "hashtags": false,
                "numbers": "",
                "emails": "EMAIL",
                "subreddits": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.hashtags, EntityAction::Keep);
        assert_eq!(config.numbers, EntityAction::Remove);
        assert_eq!(config.emails, EntityAction::Replace("EMAIL".to_string()));
        assert_eq!(config.subreddits, EntityAction::Keep);

        assert!(TokenizerConfig::from_json_str(r#"{ "hashtags": true }"#).is_err());
    }

    #[test]
    fn test_url_mode_keywords() {
        for (json, mode) in [
            (r#""domain""#, UrlMode::Domain),
            (r#""domain_unwrap""#, UrlMode::DomainUnwrap),
            (r#""domain_unwrap_fast""#, UrlMode::DomainUnwrapFast),
            (r#""title""#, UrlMode::Title),
            (r#""URL""#, UrlMode::Replace("URL".to_string())),
            (r#""""#, UrlMode::Remove),
            ("false", UrlMode::Keep),
        ] {
            let config =
                TokenizerConfig::from_json_str(&format!(r#"{{ "urls": {json} }}"#)).unwrap();
            assert_eq!(config.urls, mode);
        }

        assert!(UrlMode::Title.needs_network());
        assert!(!UrlMode::Domain.needs_network());
    }

    #[test]
    fn test_stopwords_and_stem_forms() {
        let config = TokenizerConfig::from_json_str(
            r#"{ "ignorestopwords": ["is", "the"], "stem": "stem" }"#,
        )
        .unwrap();
        assert_eq!(
            config.ignorestopwords,
            StopwordsOption::Words(vec!["is".to_string(), "the".to_string()])
        );
        assert_eq!(config.stem, StemOption::Stem);

        let config = TokenizerConfig::from_json_str(r#"{ "ignorestopwords": "russian" }"#).unwrap();
        assert_eq!(
            config.ignorestopwords,
            StopwordsOption::Language("russian".to_string())
        );

        assert!(TokenizerConfig::from_json_str(r#"{ "stem": "porter2" }"#).is_err());
    }

    #[test]
    fn test_normalize_forms() {
        for (json, expected) in [
            ("false", None),
            ("null", None),
            ("0", None),
            ("2", Some(2)),
        ] {
            let config =
                TokenizerConfig::from_json_str(&format!(r#"{{ "normalize": {json} }}"#)).unwrap();
            assert_eq!(config.normalize, expected, "normalize: {json}");
        }

        assert_eq!(TokenizerConfig::from_json_str("{}").unwrap().normalize, Some(3));
        assert!(TokenizerConfig::from_json_str(r#"{ "normalize": true }"#).is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = TokenizerConfig::from_json_str(r#"{ "splithashtag": true }"#).unwrap_err();
        assert!(err.to_string().contains("splithashtag"));
    }

    #[test]
    fn test_json_round_trip_keeps_modes() {
        let config = TokenizerConfig {
            urls: UrlMode::DomainUnwrapFast,
            numbers: EntityAction::Remove,
            stem: StemOption::Lemm,
            ..Default::default()
        };

        let json = config.to_json_pretty().unwrap();
        let parsed = TokenizerConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_conflicts() {
        let config = TokenizerConfig {
            splithashtags: true,
            hashtags: EntityAction::replace("HASHTAG"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SocialtokError::Configuration(_))
        ));

        let config = TokenizerConfig {
            ngrams: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TokenizerConfig {
            keep_untokenized: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_zero_disables() {
        let config = TokenizerConfig {
            normalize: Some(0),
            ..Default::default()
        };
        assert_eq!(config.normalize_threshold(), None);
    }
}
