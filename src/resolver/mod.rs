//! URL resolution collaborators.
//!
//! The entity stage never talks to the network directly. It asks a
//! [`UrlResolver`] to follow redirects or fetch a page title, and falls back to
//! a placeholder when the resolver fails. Tests inject fakes; production code
//! uses [`HttpResolver`] wrapped in a [`CachingResolver`].
//!
//! # Examples
//!
//! ```
//! use socialtok::error::Result;
//! use socialtok::resolver::{UrlResolver, registrable_label};
//!
//! struct Fixed;
//!
//! impl UrlResolver for Fixed {
//!     fn resolve(&self, _url: &str) -> Result<String> {
//!         Ok("https://www.bloomberg.com/news".to_string())
//!     }
//!
//!     fn fetch_title(&self, _url: &str) -> Result<String> {
//!         Ok("Bloomberg".to_string())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "fixed"
//!     }
//! }
//!
//! let target = Fixed.resolve("https://t.co/abc").unwrap();
//! assert_eq!(registrable_label(&target).as_deref(), Some("bloomberg"));
//! ```

pub mod cache;
pub mod domain;
pub mod http;

pub use cache::{CachingResolver, DEFAULT_CACHE_CAPACITY};
pub use domain::registrable_label;
pub use http::HttpResolver;

use crate::error::Result;

/// Resolves URLs over the network.
///
/// Implementations must bound every call with a timeout and report failures
/// as [`SocialtokError::Network`](crate::error::SocialtokError::Network).
pub trait UrlResolver: Send + Sync {
    /// Follow redirects and return the final location.
    fn resolve(&self, url: &str) -> Result<String>;

    /// Like [`resolve`](Self::resolve), allowed to use a cheaper request.
    fn resolve_fast(&self, url: &str) -> Result<String> {
        self.resolve(url)
    }

    /// Fetch the page and return the text of its `<title>`.
    fn fetch_title(&self, url: &str) -> Result<String>;

    /// Get the name of this resolver.
    fn name(&self) -> &'static str;
}
