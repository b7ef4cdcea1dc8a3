//! Compiled pattern registry.
//!
//! [`PatternRegistry::compile`] turns a [`TokenizerConfig`] into a
//! [`CompiledPatternSet`]: the built-in entity matchers plus the user's extra
//! patterns and keep-untokenized phrases. Built-in regexes are compiled once
//! per process and shared; a compiled set is immutable.
//!
//! Repeated-character runs are detected by a char scan in the normalizer
//! rather than here, because the regex engine has no backreferences.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::TokenizerConfig;
use crate::error::{Result, SocialtokError};

lazy_static! {
    static ref URL_REGEX: Regex =
        Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"\u{E000}-\u{E005}]+"#).unwrap();
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").unwrap();
    static ref TWITTER_HANDLE_REGEX: Regex = Regex::new(r"\B@[A-Za-z0-9_]{1,30}").unwrap();
    static ref REDDIT_USERNAME_REGEX: Regex =
        Regex::new(r"(?:\B/|\b)u/[A-Za-z0-9_\-]{2,}").unwrap();
    static ref SUBREDDIT_REGEX: Regex = Regex::new(r"(?:\B/|\b)r/[A-Za-z0-9_]{2,}").unwrap();
    static ref HASHTAG_REGEX: Regex = Regex::new(r"\B#\w+").unwrap();
    static ref NUMBER_REGEX: Regex = Regex::new(r"\b\d+(?:[.,]\d+)*\b").unwrap();
    static ref QUOTE_REGEX: Regex = Regex::new(r#""[^"\n]*"|“[^”\n]*”"#).unwrap();
    static ref REDDIT_QUOTE_REGEX: Regex = Regex::new(r"(?m)^[ \t]*(?:>|&gt;).*$").unwrap();
    static ref NON_LATIN_REGEX: Regex =
        Regex::new(r"[^\x00-\x7F\u{00A0}-\u{024F}\u{1E00}-\u{1EFF}\u{2000}-\u{206F}]").unwrap();
    static ref WORD_SPLIT_REGEX: Regex = Regex::new(concat!(
        r"(?P<marked>[\u{E000}\u{E002}\u{E004}][^\u{E001}]*\u{E001})",
        r"|(?P<linebreak>\r\n|\r|\n)",
        r"|(?P<hashtag>#\w+)",
        r"|(?P<mention>@\w+)",
        r"|(?P<number>\d+(?:[.,]\d+)+)",
        r"|(?P<word>\w+(?:['’\-]\w+)*)",
        r"|(?P<emoji>\p{Regional_Indicator}{2}",
        r"|\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?",
        r"(?:\x{200D}\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?)*)",
        r"|(?P<punct>[^\w\s\p{Extended_Pictographic}\p{Regional_Indicator}\u{E000}-\u{E005}]+)",
        r"|(?P<other>\S)",
    ))
    .unwrap();
}

/// A user rule compiled from an [`ExtraPattern`](crate::config::ExtraPattern).
#[derive(Clone, Debug)]
pub struct CompiledExtraPattern {
    /// Rule name.
    pub label: String,
    /// Compiled matcher.
    pub regex: Regex,
    /// Placeholder for each match; empty deletes.
    pub replacement: String,
}

/// A keep-untokenized phrase ready for matching.
#[derive(Clone, Debug)]
pub struct CompiledPhrase {
    /// Case-insensitive matcher tolerant of any inner whitespace.
    pub regex: Regex,
    /// The fused, lower-cased token emitted for every match.
    pub token: String,
}

/// Every matcher a tokenizer needs, derived from its configuration.
#[derive(Clone, Debug)]
pub struct CompiledPatternSet {
    pub url: Regex,
    pub email: Regex,
    pub twitter_handle: Regex,
    pub reddit_username: Regex,
    pub subreddit: Regex,
    pub hashtag: Regex,
    pub number: Regex,
    pub quote: Regex,
    pub reddit_quote: Regex,
    pub non_latin: Regex,
    pub word_split: Regex,
    /// User rules in configuration order.
    pub extra: Vec<CompiledExtraPattern>,
    /// Phrases, longest first.
    pub phrases: Vec<CompiledPhrase>,
}

/// Builds [`CompiledPatternSet`]s.
pub struct PatternRegistry;

impl PatternRegistry {
    /// Compile the pattern set for a configuration.
    ///
    /// Fails with a configuration error if an extra pattern is not a valid
    /// regular expression or the configuration has conflicting options.
    pub fn compile(config: &TokenizerConfig) -> Result<CompiledPatternSet> {
        config.validate()?;

        let extra = config
            .extra_patterns
            .iter()
            .map(|extra| {
                let regex = Regex::new(&extra.pattern).map_err(|e| {
                    SocialtokError::configuration(format!(
                        "invalid extra pattern '{}': {e}",
                        extra.label
                    ))
                })?;
                Ok(CompiledExtraPattern {
                    label: extra.label.clone(),
                    regex,
                    replacement: extra.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut phrases = config
            .keep_untokenized
            .iter()
            .map(|phrase| Self::compile_phrase(phrase, config.whitespaces_to_underscores))
            .collect::<Result<Vec<_>>>()?;
        phrases.sort_by(|a, b| {
            b.token
                .chars()
                .count()
                .cmp(&a.token.chars().count())
                .then_with(|| a.token.cmp(&b.token))
        });

        Ok(CompiledPatternSet {
            url: URL_REGEX.clone(),
            email: EMAIL_REGEX.clone(),
            twitter_handle: TWITTER_HANDLE_REGEX.clone(),
            reddit_username: REDDIT_USERNAME_REGEX.clone(),
            subreddit: SUBREDDIT_REGEX.clone(),
            hashtag: HASHTAG_REGEX.clone(),
            number: NUMBER_REGEX.clone(),
            quote: QUOTE_REGEX.clone(),
            reddit_quote: REDDIT_QUOTE_REGEX.clone(),
            non_latin: NON_LATIN_REGEX.clone(),
            word_split: WORD_SPLIT_REGEX.clone(),
            extra,
            phrases,
        })
    }

    fn compile_phrase(phrase: &str, underscores: bool) -> Result<CompiledPhrase> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let separator = if underscores { "_" } else { " " };
        let token = words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(separator);

        let mut pattern = String::from("(?i)");
        if phrase.trim_start().starts_with(is_word_char) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(
            &words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join(r"\s+"),
        );
        if phrase.trim_end().ends_with(is_word_char) {
            pattern.push_str(r"\b");
        }

        let regex = Regex::new(&pattern).map_err(|e| {
            SocialtokError::configuration(format!("invalid keep_untokenized phrase '{phrase}': {e}"))
        })?;

        Ok(CompiledPhrase { regex, token })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EntityAction, ExtraPattern};

    fn compile_default() -> CompiledPatternSet {
        PatternRegistry::compile(&TokenizerConfig::default()).unwrap()
    }

    #[test]
    fn test_builtin_entity_matchers() {
        let set = compile_default();

        assert!(set.url.is_match("see http://rt.com now"));
        assert!(set.url.is_match("www.google.com"));
        assert!(set.email.is_match("en919@nyu.edu"));
        assert_eq!(
            set.twitter_handle.find("hi @crazyfrogspb.").unwrap().as_str(),
            "@crazyfrogspb"
        );
        assert!(set.twitter_handle.find("mail@host").is_none());
        assert_eq!(
            set.reddit_username.find("by u/AngryConservative").unwrap().as_str(),
            "u/AngryConservative"
        );
        assert_eq!(
            set.subreddit.find("from /r/The_Donald").unwrap().as_str(),
            "/r/The_Donald"
        );
        assert_eq!(set.hashtag.find("go #team!").unwrap().as_str(), "#team");
        assert!(set.hashtag.find("issue#12").is_none());
    }

    #[test]
    fn test_word_split_groups() {
        let set = compile_default();
        let caps: Vec<_> = set.word_split.captures_iter("isn't 45-year #tag 😭 ...").collect();

        assert_eq!(&caps[0]["word"], "isn't");
        assert_eq!(&caps[1]["word"], "45-year");
        assert_eq!(&caps[2]["hashtag"], "#tag");
        assert_eq!(&caps[3]["emoji"], "😭");
        assert_eq!(&caps[4]["punct"], "...");
    }

    #[test]
    fn test_invalid_extra_pattern_is_configuration_error() {
        let config = TokenizerConfig {
            extra_patterns: vec![ExtraPattern::new("broken", "(unclosed", "X")],
            ..Default::default()
        };

        match PatternRegistry::compile(&config) {
            Err(SocialtokError::Configuration(msg)) => assert!(msg.contains("broken")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_options_fail_compile() {
        let config = TokenizerConfig {
            splithashtags: true,
            hashtags: EntityAction::Remove,
            ..Default::default()
        };
        assert!(PatternRegistry::compile(&config).is_err());
    }

    #[test]
    fn test_phrases_sorted_longest_first() {
        let config = TokenizerConfig {
            keep_untokenized: vec!["New York".to_string(), "New York City".to_string()],
            ..Default::default()
        };
        let set = PatternRegistry::compile(&config).unwrap();

        assert_eq!(set.phrases[0].token, "new_york_city");
        assert_eq!(set.phrases[1].token, "new_york");
        assert!(set.phrases[0].regex.is_match("in NEW  york city"));
    }

    #[test]
    fn test_phrase_without_underscores() {
        let config = TokenizerConfig {
            keep_untokenized: vec!["Los Angeles".to_string()],
            whitespaces_to_underscores: false,
            ..Default::default()
        };
        let set = PatternRegistry::compile(&config).unwrap();
        assert_eq!(set.phrases[0].token, "los angeles");
    }
}
