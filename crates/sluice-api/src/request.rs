//! Request descriptor attached to response failures

use http::{HeaderMap, Method};
use url::Url;

/// Description of the request that led to a response
#[derive(Debug, Clone)]
pub struct RequestInfo {
    /// Request method
    pub method: Method,
    /// Request URL with the fragment stripped, as sent on the wire
    pub url: Url,
    /// Request headers as sent
    pub headers: HeaderMap,
    /// URL as supplied by the caller, fragment included
    pub real_url: Url,
}

impl RequestInfo {
    /// Create a request descriptor with no headers
    ///
    /// The wire URL is the supplied URL without its fragment.
    pub fn new(method: Method, url: Url) -> Self {
        let mut wire = url.clone();
        wire.set_fragment(None);
        Self {
            method,
            url: wire,
            headers: HeaderMap::new(),
            real_url: url,
        }
    }

    /// Attach the request headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}
