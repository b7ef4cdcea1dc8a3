//! Loading tokenizer configurations and dictionaries from disk.

use std::fs;

use socialtok::cli::load_config;
use socialtok::error::{Result, SocialtokError};
use socialtok::prelude::*;
use tempfile::TempDir;

#[test]
fn test_load_json_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("tokenizer.json");
    fs::write(
        &path,
        r#"{
            "keepcaps": true,
            "normalize": 2,
            "twitter_handles": "HANDLE",
            "urls": "",
            "numbers": false,
            "ignorestopwords": ["is", "the"],
            "stem": "stem"
        }"#,
    )?;

    let config = load_config(Some(&path))?;
    assert!(config.keepcaps);
    assert_eq!(config.normalize, Some(2));
    assert_eq!(config.twitter_handles, EntityAction::replace("HANDLE"));
    assert_eq!(config.urls, UrlMode::Remove);
    assert_eq!(config.numbers, EntityAction::Keep);
    assert_eq!(
        config.ignorestopwords,
        StopwordsOption::Words(vec!["is".to_string(), "the".to_string()])
    );
    assert_eq!(config.stem, StemOption::Stem);

    let tokenizer = SocialTokenizer::new(TokenizerConfig {
        stem: StemOption::None,
        ..config
    })?;
    assert_eq!(
        tokenizer.tokenize("@crazyfrogspb is the BEST http://x.com")?,
        vec!["HANDLE", "BEST"]
    );

    Ok(())
}

#[test]
fn test_missing_file_defaults() -> Result<()> {
    assert_eq!(load_config(None)?, TokenizerConfig::default());

    let dir = TempDir::new()?;
    let err = load_config(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(matches!(err, SocialtokError::Configuration(_)));

    Ok(())
}

#[test]
fn test_true_is_not_an_entity_action() -> Result<()> {
    let err = TokenizerConfig::from_json_str(r#"{ "hashtags": true }"#).unwrap_err();
    assert!(matches!(err, SocialtokError::Json(_)));

    Ok(())
}

#[test]
fn test_misspelled_option_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("typo.json");
    fs::write(&path, r#"{ "lowercse": false, "splithashtag": true }"#)?;

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, SocialtokError::Configuration(_)));
    assert!(err.to_string().contains("unknown field"));

    Ok(())
}

#[test]
fn test_normalize_false_disables_collapse() -> Result<()> {
    let config = TokenizerConfig::from_json_str(r#"{ "normalize": false }"#)?;
    assert_eq!(config.normalize, None);

    let tokenizer = SocialTokenizer::new(config)?;
    assert_eq!(tokenizer.tokenize("sooooo good")?, vec!["sooooo", "good"]);

    Ok(())
}

#[test]
fn test_json_round_trip_preserves_options() -> Result<()> {
    let config = TokenizerConfig {
        urls: UrlMode::DomainUnwrapFast,
        emails: EntityAction::Remove,
        ignorestopwords: StopwordsOption::Language("english".to_string()),
        keep_untokenized: vec!["New York".to_string()],
        ..TokenizerConfig::default()
    };

    let parsed = TokenizerConfig::from_json_str(&config.to_json_pretty()?)?;
    assert_eq!(parsed, config);

    Ok(())
}

#[test]
fn test_conflicting_options_rejected() -> Result<()> {
    let config = TokenizerConfig::from_json_str(
        r#"{ "splithashtags": true, "hashtags": "HASHTAG" }"#,
    )?;
    let err = SocialTokenizer::new(config).unwrap_err();
    assert!(matches!(err, SocialtokError::Configuration(_)));

    Ok(())
}

#[test]
fn test_hashtag_dictionary_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "# word frequencies\nvodka 120\nis 900\nlife 75\n")?;

    let config = TokenizerConfig {
        splithashtags: true,
        hashtag_dictionary: Some(dictionary),
        ..TokenizerConfig::default()
    };
    let tokenizer = SocialTokenizer::new(config)?;
    assert_eq!(
        tokenizer.tokenize("#VodkaIsLife forever")?,
        vec!["vodka", "is", "life", "forever"]
    );

    Ok(())
}

#[test]
fn test_bad_dictionary_line() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.txt");
    fs::write(&path, "vodka 12\nbeer lots\n")?;

    let err = Dictionary::from_file(&path).unwrap_err();
    match err {
        SocialtokError::Configuration(message) => assert!(message.contains(":2")),
        other => panic!("unexpected error: {other}"),
    }

    Ok(())
}
