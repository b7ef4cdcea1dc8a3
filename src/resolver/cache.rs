//! Memoizing resolver wrapper.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use super::UrlResolver;
use crate::error::Result;

/// Default number of answers kept by [`CachingResolver::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Lookup {
    Resolve,
    ResolveFast,
    Title,
}

type CacheKey = (Lookup, String);

/// Cached answers plus their insertion order, oldest first.
#[derive(Default)]
struct Entries {
    answers: AHashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
}

impl Entries {
    fn insert(&mut self, key: CacheKey, answer: String, capacity: usize) {
        if self.answers.insert(key.clone(), answer).is_some() {
            return;
        }
        self.order.push_back(key);

        while self.answers.len() > capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.answers.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// Wraps a resolver and remembers up to `capacity` successful answers.
///
/// When full, the oldest answer is evicted first. Failures are not cached,
/// so a flaky host is retried on its next occurrence. The cache is shared by
/// all threads using the wrapper.
pub struct CachingResolver<R> {
    inner: R,
    capacity: usize,
    entries: RwLock<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: UrlResolver> CachingResolver<R> {
    /// Wrap `inner` with a cache of [`DEFAULT_CACHE_CAPACITY`] answers.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wrap `inner` with a cache of `capacity` answers (at least one).
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        CachingResolver {
            inner,
            capacity: capacity.max(1),
            entries: RwLock::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of cached answers.
    pub fn len(&self) -> usize {
        self.entries.read().answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().answers.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups forwarded to the wrapped resolver.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn cached<F>(&self, lookup: Lookup, url: &str, fetch: F) -> Result<String>
    where
        F: FnOnce(&R, &str) -> Result<String>,
    {
        let key = (lookup, url.to_string());
        if let Some(answer) = self.entries.read().answers.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(answer.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let answer = fetch(&self.inner, url)?;
        self.entries
            .write()
            .insert(key, answer.clone(), self.capacity);
        Ok(answer)
    }
}

impl<R: UrlResolver> UrlResolver for CachingResolver<R> {
    fn resolve(&self, url: &str) -> Result<String> {
        self.cached(Lookup::Resolve, url, |inner, url| inner.resolve(url))
    }

    fn resolve_fast(&self, url: &str) -> Result<String> {
        self.cached(Lookup::ResolveFast, url, |inner, url| inner.resolve_fast(url))
    }

    fn fetch_title(&self, url: &str) -> Result<String> {
        self.cached(Lookup::Title, url, |inner, url| inner.fetch_title(url))
    }

    fn name(&self) -> &'static str {
        "caching"
    }
}
