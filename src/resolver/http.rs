//! HTTP resolver backed by a blocking `reqwest` client.

use std::time::Duration;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::UrlResolver;
use crate::error::{Result, SocialtokError};

lazy_static! {
    static ref TITLE_REGEX: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
}

/// Maximum number of redirects followed for a single URL.
pub const MAX_REDIRECTS: usize = 10;

/// Resolves URLs with real HTTP requests.
///
/// Every request is bounded by the configured timeout, so an unresponsive
/// host only costs the calling worker that long.
#[derive(Clone, Debug)]
pub struct HttpResolver {
    client: Client,
    timeout: Duration,
}

impl HttpResolver {
    /// Create a resolver whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("socialtok/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SocialtokError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpResolver { client, timeout })
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn absolute(url: &str) -> String {
        if url.contains("://") {
            url.to_string()
        } else {
            format!("http://{url}")
        }
    }
}

impl UrlResolver for HttpResolver {
    fn resolve(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(Self::absolute(url))
            .send()
            .map_err(|e| SocialtokError::network(format!("GET {url} failed: {e}")))?;

        let target = response.url().to_string();
        debug!("Resolved {url} to {target}");
        Ok(target)
    }

    fn resolve_fast(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .head(Self::absolute(url))
            .send()
            .map_err(|e| SocialtokError::network(format!("HEAD {url} failed: {e}")))?;

        let target = response.url().to_string();
        debug!("Resolved {url} to {target} (HEAD)");
        Ok(target)
    }

    fn fetch_title(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(Self::absolute(url))
            .send()
            .map_err(|e| SocialtokError::network(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SocialtokError::network(format!(
                "GET {url} returned status {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|e| SocialtokError::network(format!("failed to read {url}: {e}")))?;

        extract_title(&body)
            .ok_or_else(|| SocialtokError::network(format!("no <title> in {url}")))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Text of the first `<title>` element, whitespace-collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    let captures = TITLE_REGEX.captures(html)?;
    let title = captures
        .get(1)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() { None } else { Some(title) }
}
