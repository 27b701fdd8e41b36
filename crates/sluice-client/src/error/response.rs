//! Failures interpreting a received response

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use sluice_api::{RequestInfo, ResponseHistory};
use thiserror::Error;

use super::class::{Classify, ErrorClass};

/// Which response failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseErrorKind {
    /// Response could not be accepted, usually an error status
    Status,
    /// Response content type was not acceptable
    ContentType,
    /// WebSocket upgrade was rejected by the server
    WebSocketHandshake,
    /// CONNECT proxy answered with a non-200 status
    HttpProxy,
}

impl ResponseErrorKind {
    fn class(self) -> ErrorClass {
        match self {
            ResponseErrorKind::Status => ErrorClass::Response,
            ResponseErrorKind::ContentType => ErrorClass::ContentType,
            ResponseErrorKind::WebSocketHandshake => ErrorClass::WebSocketHandshake,
            ResponseErrorKind::HttpProxy => ErrorClass::HttpProxy,
        }
    }
}

/// Failure interpreting a received response
///
/// Carries the originating request and the redirect chain verbatim so
/// callers can inspect how the failing response was reached. A status of
/// `0` means no status line was available.
#[derive(Error, Debug, Clone)]
#[error("{status}, message='{message}'")]
pub struct ResponseError {
    kind: ResponseErrorKind,
    request_info: RequestInfo,
    history: ResponseHistory,
    status: u16,
    message: String,
    headers: Option<HeaderMap>,
}

impl ResponseError {
    /// Create a generic response error
    pub fn new(request_info: RequestInfo, history: ResponseHistory) -> Self {
        Self::with_kind(ResponseErrorKind::Status, request_info, history)
    }

    /// Create an error for an unacceptable content type
    pub fn content_type(request_info: RequestInfo, history: ResponseHistory) -> Self {
        Self::with_kind(ResponseErrorKind::ContentType, request_info, history)
    }

    /// Create an error for a rejected WebSocket upgrade
    pub fn websocket_handshake(request_info: RequestInfo, history: ResponseHistory) -> Self {
        Self::with_kind(ResponseErrorKind::WebSocketHandshake, request_info, history)
    }

    /// Create an error for a proxy that refused a CONNECT request
    pub fn http_proxy(request_info: RequestInfo, history: ResponseHistory) -> Self {
        Self::with_kind(ResponseErrorKind::HttpProxy, request_info, history)
    }

    /// Create a response error of the given kind
    pub fn with_kind(
        kind: ResponseErrorKind,
        request_info: RequestInfo,
        history: ResponseHistory,
    ) -> Self {
        Self {
            kind,
            request_info,
            history,
            status: 0,
            message: String::new(),
            headers: None,
        }
    }

    /// Set the response status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the diagnostic message, usually the reason phrase
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the response headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Which response failure occurred
    #[must_use]
    pub fn response_kind(&self) -> ResponseErrorKind {
        self.kind
    }

    /// Request that produced the response
    #[must_use]
    pub fn request_info(&self) -> &RequestInfo {
        &self.request_info
    }

    /// Responses received before the failing one, oldest first
    #[must_use]
    pub fn history(&self) -> &ResponseHistory {
        &self.history
    }

    /// Raw status, `0` when unknown
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status as a typed code, `None` when unknown or out of range
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    /// Diagnostic message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Response headers, if they were attached
    #[must_use]
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }
}

impl Classify for ResponseError {
    fn kind(&self) -> ErrorClass {
        self.kind.class()
    }

    fn is(&self, class: ErrorClass) -> bool {
        matches!(class, ErrorClass::Client | ErrorClass::Response) || class == self.kind.class()
    }
}
