//! Entity replacement.
//!
//! [`EntityCharFilter`] rewrites structured substrings before the text is
//! split into words. Rules run in a fixed order, each on the output of the
//! previous one:
//!
//! 1. emails
//! 2. URLs (literal, domain, unwrapped domain or page title)
//! 3. Twitter handles, Reddit usernames, subreddits
//! 4. hashtags
//! 5. standalone numbers
//!
//! User extra patterns run earlier, in their own char filters. Kept URLs and
//! emails are wrapped as protected spans so that later rules and the word
//! splitter cannot cut them apart.

use std::sync::Arc;

use log::warn;
use regex::{Match, Regex};

use super::{CharFilter, map_free_segments, placeholder, protected};
use crate::analysis::patterns::CompiledPatternSet;
use crate::config::{EntityAction, TokenizerConfig, UrlMode};
use crate::error::{Result, SocialtokError};
use crate::resolver::{UrlResolver, registrable_label};

const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', ')', ']', '\'', '"', '…'];

/// One entity class and what to do with it.
#[derive(Clone, Debug)]
struct EntityRule {
    regex: Regex,
    action: EntityAction,
    protect_kept: bool,
}

/// Replaces or removes URLs, emails, handles, subreddits, hashtags and numbers.
#[derive(Clone)]
pub struct EntityCharFilter {
    emails: EntityRule,
    url: Regex,
    url_mode: UrlMode,
    url_fallback: String,
    resolver: Option<Arc<dyn UrlResolver>>,
    references: Vec<EntityRule>,
    number: EntityRule,
}

impl EntityCharFilter {
    /// Create an entity filter.
    ///
    /// A resolver is required when the URL mode needs the network.
    pub fn new(
        patterns: &CompiledPatternSet,
        config: &TokenizerConfig,
        resolver: Option<Arc<dyn UrlResolver>>,
    ) -> Result<Self> {
        if config.urls.needs_network() && resolver.is_none() {
            return Err(SocialtokError::configuration(format!(
                "URL mode {:?} needs a URL resolver",
                config.urls
            )));
        }

        let rule = |regex: &Regex, action: &EntityAction, protect_kept: bool| EntityRule {
            regex: regex.clone(),
            action: action.clone(),
            protect_kept,
        };

        Ok(EntityCharFilter {
            emails: rule(&patterns.email, &config.emails, true),
            url: patterns.url.clone(),
            url_mode: config.urls.clone(),
            url_fallback: config.url_fallback.clone(),
            resolver,
            references: vec![
                rule(&patterns.twitter_handle, &config.twitter_handles, false),
                rule(&patterns.reddit_username, &config.reddit_usernames, false),
                rule(&patterns.subreddit, &config.subreddits, false),
                rule(&patterns.hashtag, &config.hashtags, false),
            ],
            number: rule(&patterns.number, &config.numbers, false),
        })
    }

    fn apply_rule(text: &str, rule: &EntityRule) -> String {
        if matches!(rule.action, EntityAction::Keep) && !rule.protect_kept {
            return text.to_string();
        }

        map_free_segments(text, |free| {
            rewrite_matches(free, &rule.regex, |_, m| Some(substitute(&rule.action, m.as_str())))
        })
    }

    fn apply_numbers(&self, text: &str) -> String {
        if !self.number.action.is_active() {
            return text.to_string();
        }

        map_free_segments(text, |free| {
            rewrite_matches(free, &self.number.regex, |whole, m| {
                if is_hyphen_joined(whole, m) {
                    None
                } else {
                    Some(substitute(&self.number.action, m.as_str()))
                }
            })
        })
    }

    fn apply_urls(&self, text: &str) -> String {
        map_free_segments(text, |free| {
            rewrite_matches(free, &self.url, |_, m| {
                let url = m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
                let trailing = &m.as_str()[url.len()..];
                Some(format!("{}{trailing}", self.replace_url(url)))
            })
        })
    }

    fn replace_url(&self, url: &str) -> String {
        match &self.url_mode {
            UrlMode::Keep => protected(url),
            UrlMode::Remove => " ".to_string(),
            UrlMode::Replace(label) => placeholder(label),
            UrlMode::Domain => self.domain_placeholder(url),
            UrlMode::DomainUnwrap => self.with_resolver(url, |r| r.resolve(url)),
            UrlMode::DomainUnwrapFast => self.with_resolver(url, |r| r.resolve_fast(url)),
            UrlMode::Title => {
                let title = self
                    .resolver
                    .as_ref()
                    .map(|r| r.fetch_title(url))
                    .unwrap_or_else(|| Err(SocialtokError::network("no resolver configured")));
                match title.map(|t| first_word(&t)) {
                    Ok(Some(word)) => placeholder(&word),
                    Ok(None) => self.fallback(url, "empty page title"),
                    Err(e) => self.fallback(url, &e.to_string()),
                }
            }
        }
    }

    fn with_resolver<F>(&self, url: &str, resolve: F) -> String
    where
        F: FnOnce(&dyn UrlResolver) -> Result<String>,
    {
        let target = match &self.resolver {
            Some(resolver) => resolve(resolver.as_ref()),
            None => Err(SocialtokError::network("no resolver configured")),
        };

        match target {
            Ok(target) => self.domain_placeholder(&target),
            Err(e) => self.fallback(url, &e.to_string()),
        }
    }

    fn domain_placeholder(&self, url: &str) -> String {
        match registrable_label(url) {
            Some(label) => placeholder(&label),
            None => self.fallback(url, "no host"),
        }
    }

    fn fallback(&self, url: &str, reason: &str) -> String {
        warn!(
            "Could not resolve {url} ({reason}), using placeholder '{}'",
            self.url_fallback
        );
        placeholder(&self.url_fallback)
    }
}

impl CharFilter for EntityCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut text = Self::apply_rule(input, &self.emails);
        text = self.apply_urls(&text);
        for rule in &self.references {
            text = Self::apply_rule(&text, rule);
        }
        self.apply_numbers(&text)
    }

    fn name(&self) -> &'static str {
        "entity"
    }
}

impl std::fmt::Debug for EntityCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCharFilter")
            .field("url_mode", &self.url_mode)
            .field("url_fallback", &self.url_fallback)
            .field("resolver", &self.resolver.as_ref().map(|r| r.name()))
            .finish()
    }
}

fn substitute(action: &EntityAction, matched: &str) -> String {
    match action {
        EntityAction::Keep => protected(matched),
        EntityAction::Remove => " ".to_string(),
        EntityAction::Replace(label) => placeholder(label),
    }
}

/// Rewrite every match of `regex` in `text`. Returning `None` keeps the match.
fn rewrite_matches<F>(text: &str, regex: &Regex, mut replace: F) -> String
where
    F: FnMut(&str, Match<'_>) -> Option<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for m in regex.find_iter(text) {
        if let Some(replacement) = replace(text, m) {
            output.push_str(&text[last..m.start()]);
            output.push_str(&replacement);
            last = m.end();
        }
    }

    output.push_str(&text[last..]);
    output
}

/// `45-year` or `covid-19`: a number glued to a word by a hyphen is not standalone.
fn is_hyphen_joined(text: &str, m: Match<'_>) -> bool {
    let mut after = text[m.end()..].chars();
    let joined_after =
        after.next() == Some('-') && after.next().is_some_and(|c| c.is_alphanumeric());

    let mut before = text[..m.start()].chars().rev();
    let joined_before =
        before.next() == Some('-') && before.next().is_some_and(|c| c.is_alphanumeric());

    joined_after || joined_before
}

fn first_word(title: &str) -> Option<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .find(|word| !word.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::{MARK_CLOSE, PLACEHOLDER_OPEN, PROTECTED_OPEN};
    use crate::analysis::patterns::PatternRegistry;

    struct FakeResolver;

    impl UrlResolver for FakeResolver {
        fn resolve(&self, url: &str) -> Result<String> {
            if url.contains("t.co") {
                Ok("https://www.bloomberg.com/news/articles/jobs".to_string())
            } else {
                Err(SocialtokError::network("timed out"))
            }
        }

        fn fetch_title(&self, _url: &str) -> Result<String> {
            Ok("Google Search".to_string())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn filter_for(config: TokenizerConfig) -> EntityCharFilter {
        let patterns = PatternRegistry::compile(&config).unwrap();
        EntityCharFilter::new(&patterns, &config, Some(Arc::new(FakeResolver))).unwrap()
    }

    fn ph(label: &str) -> String {
        format!("{PLACEHOLDER_OPEN}{label}{MARK_CLOSE}")
    }

    #[test]
    fn test_replacements() {
        let filter = filter_for(TokenizerConfig {
            twitter_handles: EntityAction::replace("handle"),
            urls: UrlMode::Replace("url".to_string()),
            numbers: EntityAction::replace("number"),
            ..Default::default()
        });
        let output = filter.filter(
            "http://fscorelab.ru is number 1 site according to @crazyfrogspb. http://www.google.com",
        );

        assert_eq!(output.matches(&ph("url")).count(), 2);
        assert_eq!(output.matches(&ph("number")).count(), 1);
        assert!(output.contains(&format!("{} .", ph("handle"))));
    }

    #[test]
    fn test_reddit_references_and_email() {
        let filter = filter_for(TokenizerConfig {
            emails: EntityAction::replace("email"),
            reddit_usernames: EntityAction::replace("redditor"),
            subreddits: EntityAction::replace("subreddit"),
            hashtags: EntityAction::replace("hashtag"),
            twitter_handles: EntityAction::replace("handle"),
            ..Default::default()
        });
        let output = filter.filter(
            "en919@nyu.edu was hacked by u/AngryConservative from /r/The_Donald #americanhacking",
        );

        for label in ["email", "redditor", "subreddit", "hashtag"] {
            assert!(output.contains(&ph(label)), "missing {label} in {output}");
        }
        assert!(!output.contains(&ph("handle")));
    }

    #[test]
    fn test_removal_leaves_whitespace() {
        let filter = filter_for(TokenizerConfig {
            urls: UrlMode::Remove,
            ..Default::default()
        });
        let output = filter.filter("visit https://github.com/crazyfrogspb/RedditScore. now");
        assert_eq!(output.split_whitespace().collect::<Vec<_>>(), vec!["visit", ".", "now"]);
    }

    #[test]
    fn test_kept_url_is_protected() {
        let filter = filter_for(TokenizerConfig {
            numbers: EntityAction::Remove,
            ..Default::default()
        });
        let output = filter.filter("see http://site.com/page/42, ok");

        assert!(output.contains(&format!("{PROTECTED_OPEN}http://site.com/page/42{MARK_CLOSE}")));
        assert!(output.ends_with(", ok"));
    }

    #[test]
    fn test_domain_modes() {
        let filter = filter_for(TokenizerConfig {
            urls: UrlMode::Domain,
            ..Default::default()
        });
        let output = filter.filter("go to http://rt.com to chat, http://forums.news.cnn.com/ sucks");
        assert!(output.contains(&ph("rt")));
        assert!(output.contains(&ph("cnn")));

        let filter = filter_for(TokenizerConfig {
            urls: UrlMode::DomainUnwrap,
            ..Default::default()
        });
        assert!(filter.filter("low. https://t.co/pN2TE5HDQm").contains(&ph("bloomberg")));
    }

    #[test]
    fn test_resolution_failure_falls_back() {
        let filter = filter_for(TokenizerConfig {
            urls: UrlMode::DomainUnwrapFast,
            ..Default::default()
        });
        assert!(filter.filter("http://down.example/x").contains(&ph("URL")));
    }

    #[test]
    fn test_title_mode() {
        let filter = filter_for(TokenizerConfig {
            urls: UrlMode::Title,
            ..Default::default()
        });
        assert_eq!(filter.filter("http://google.com").trim(), ph("google"));
    }

    #[test]
    fn test_numbers_joined_by_hyphen_are_kept() {
        let filter = filter_for(TokenizerConfig {
            numbers: EntityAction::replace("NUM"),
            ..Default::default()
        });
        let output = filter.filter("a 45-year low, covid-19 and 3.5 percent");

        assert!(output.contains("45-year"));
        assert!(output.contains("covid-19"));
        assert_eq!(output.matches(&ph("NUM")).count(), 1);
    }

    #[test]
    fn test_network_mode_without_resolver() {
        let config = TokenizerConfig {
            urls: UrlMode::Title,
            ..Default::default()
        };
        let patterns = PatternRegistry::compile(&config).unwrap();
        assert!(matches!(
            EntityCharFilter::new(&patterns, &config, None),
            Err(SocialtokError::Configuration(_))
        ));
    }

    #[test]
    fn test_first_word() {
        assert_eq!(first_word(" — Bloomberg: news").as_deref(), Some("bloomberg"));
        assert_eq!(first_word("..."), None);
    }
}
