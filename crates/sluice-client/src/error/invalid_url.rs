//! Malformed URL input

use thiserror::Error;
use url::Url;

use super::class::{Classify, ErrorClass};

/// Supplied URL is structurally invalid
///
/// Classified both as a client error and as an invalid argument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid URL: {url}")]
pub struct InvalidUrl {
    url: String,
    #[source]
    reason: Option<url::ParseError>,
}

impl InvalidUrl {
    /// Create an error for the offending URL text
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: None,
        }
    }

    /// Create an error carrying the parser's reason
    pub fn with_reason(url: impl Into<String>, reason: url::ParseError) -> Self {
        Self {
            url: url.into(),
            reason: Some(reason),
        }
    }

    /// URL text exactly as supplied
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parser failure, when the URL did not parse at all
    #[must_use]
    pub fn reason(&self) -> Option<url::ParseError> {
        self.reason
    }
}

impl Classify for InvalidUrl {
    fn kind(&self) -> ErrorClass {
        ErrorClass::InvalidUrl
    }

    fn is(&self, class: ErrorClass) -> bool {
        matches!(
            class,
            ErrorClass::Client | ErrorClass::InvalidUrl | ErrorClass::InvalidArgument
        )
    }
}

/// Parse a request URL, rejecting input without a host part
///
/// # Errors
/// Returns [`InvalidUrl`] when the input does not parse or has no host.
pub fn parse_url(input: &str) -> Result<Url, InvalidUrl> {
    let url = Url::parse(input).map_err(|reason| InvalidUrl::with_reason(input, reason))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(InvalidUrl::new(input));
    }
    Ok(url)
}
