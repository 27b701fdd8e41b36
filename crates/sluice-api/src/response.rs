//! Response summaries and redirect history

use http::{HeaderMap, StatusCode};
use url::Url;

/// Summary of a response received before the failing one
#[derive(Debug, Clone)]
pub struct ResponseSummary {
    /// Response status
    pub status: StatusCode,
    /// URL the response was received from
    pub url: Url,
    /// Response headers
    pub headers: HeaderMap,
}

impl ResponseSummary {
    /// Create a summary with no headers
    pub fn new(status: StatusCode, url: Url) -> Self {
        Self {
            status,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Attach the response headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Ordered sequence of responses traversed before the failing one
///
/// Entries can only be appended; order and duplicates are preserved.
#[derive(Debug, Clone, Default)]
pub struct ResponseHistory {
    entries: Vec<ResponseSummary>,
}

impl ResponseHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next response in the chain
    pub fn push(&mut self, response: ResponseSummary) {
        self.entries.push(response);
    }

    /// Number of recorded responses
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no response was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in the order the responses were received
    pub fn iter(&self) -> std::slice::Iter<'_, ResponseSummary> {
        self.entries.iter()
    }

    /// Borrow the recorded responses
    #[must_use]
    pub fn as_slice(&self) -> &[ResponseSummary] {
        &self.entries
    }

    /// Most recent response, if any
    #[must_use]
    pub fn last(&self) -> Option<&ResponseSummary> {
        self.entries.last()
    }
}

impl FromIterator<ResponseSummary> for ResponseHistory {
    fn from_iter<I: IntoIterator<Item = ResponseSummary>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ResponseSummary>> for ResponseHistory {
    fn from(entries: Vec<ResponseSummary>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a ResponseHistory {
    type Item = &'a ResponseSummary;
    type IntoIter = std::slice::Iter<'a, ResponseSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(status: u16, url: &str) -> ResponseSummary {
        ResponseSummary::new(
            StatusCode::from_u16(status).unwrap(),
            Url::parse(url).unwrap(),
        )
    }

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut history = ResponseHistory::new();
        assert!(history.is_empty());

        history.push(summary(301, "http://a.test/"));
        history.push(summary(302, "http://b.test/"));
        history.push(summary(302, "http://b.test/"));

        assert_eq!(history.len(), 3);
        let statuses: Vec<u16> = history.iter().map(|r| r.status.as_u16()).collect();
        assert_eq!(statuses, vec![301, 302, 302]);
        assert_eq!(history.last().unwrap().url.as_str(), "http://b.test/");
    }

    #[test]
    fn test_collect() {
        let history: ResponseHistory = [
            summary(307, "http://a.test/"),
            summary(308, "http://c.test/"),
        ]
        .into_iter()
        .collect();
        assert_eq!(history.as_slice()[1].status, StatusCode::PERMANENT_REDIRECT);
    }
}
