//! Criterion benchmarks for socialtok.
//!
//! Covers single-document tokenization with light and heavy configurations,
//! parallel batch tokenization and hashtag segmentation.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use socialtok::config::ExtraPattern;
use socialtok::prelude::*;
use std::hint::black_box;

/// Generate synthetic posts for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let fragments = [
        "I loooove this beer",
        "@crazyfrogspb check http://rt.com",
        "#makeamericagreatagain",
        "don't forget u/someone in /r/machinelearning",
        "WHO ELECTED this Guy?! 😭",
        "only 24 hours left 😍",
        "\"stay safe\" they said",
        "New York City is expensive",
        "mail me at someone@example.com",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 3 + (i % 6);
        let doc: Vec<&str> = (0..doc_length)
            .map(|j| fragments[(i * 7 + j * 3) % fragments.len()])
            .collect();
        documents.push(doc.join(". "));
    }
    documents
}

fn dictionary() -> Dictionary {
    Dictionary::from_words([
        "make", "america", "great", "again", "another", "pint", "please", "vodka", "is", "life",
    ])
}

fn full_config() -> TokenizerConfig {
    TokenizerConfig {
        keepcaps: true,
        ignorequotes: true,
        ignorestopwords: StopwordsOption::Language("english".to_string()),
        stem: StemOption::Stem,
        decontract: true,
        splithashtags: true,
        urls: UrlMode::Domain,
        numbers: EntityAction::replace("NUMBER"),
        twitter_handles: EntityAction::replace("HANDLE"),
        subreddits: EntityAction::replace("SUBREDDIT"),
        reddit_usernames: EntityAction::replace("REDDITOR"),
        emails: EntityAction::replace("EMAIL"),
        extra_patterns: vec![ExtraPattern::new("beer", r"(?i)\bbeer\b", "DRINK")],
        pos_emojis: true,
        neg_emojis: true,
        neutral_emojis: true,
        keep_untokenized: vec!["New York City".to_string()],
        ngrams: 2,
        ..TokenizerConfig::default()
    }
}

/// Benchmark single-document tokenization.
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let document = generate_test_documents(1).remove(0);

    let default_tokenizer = SocialTokenizer::new(TokenizerConfig::default()).unwrap();
    group.bench_function("default_config", |b| {
        b.iter(|| black_box(default_tokenizer.tokenize(black_box(&document)).unwrap()))
    });

    let full_tokenizer = SocialTokenizer::builder(full_config())
        .with_dictionary(dictionary())
        .build()
        .unwrap();
    group.bench_function("full_config", |b| {
        b.iter(|| black_box(full_tokenizer.tokenize(black_box(&document)).unwrap()))
    });

    group.finish();
}

/// Benchmark parallel batch tokenization.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    let documents = generate_test_documents(1_000);
    let tokenizer = SocialTokenizer::builder(full_config())
        .with_dictionary(dictionary())
        .build()
        .unwrap();

    group.throughput(Throughput::Elements(documents.len() as u64));
    for workers in [1, 4] {
        group.bench_function(format!("tokenize_many_{workers}_workers"), |b| {
            b.iter(|| black_box(tokenizer.tokenize_many(&documents, 64, workers).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark hashtag segmentation.
fn bench_segmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmenter");
    let segmenter = HashtagSegmenter::new(dictionary());
    let hashtags = ["makeamericagreatagain", "anotherpintplease", "VodkaIsLife", "xxmakeyy"];

    group.throughput(Throughput::Elements(hashtags.len() as u64));
    group.bench_function("segment_hashtags", |b| {
        b.iter(|| {
            for hashtag in hashtags {
                black_box(segmenter.segment(black_box(hashtag)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_batch, bench_segmenter);
criterion_main!(benches);
