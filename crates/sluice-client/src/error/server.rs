//! Failures attributable to the server once connected

use std::fmt;
use std::fmt::Write as _;

use thiserror::Error;

use super::class::{Classify, ErrorClass};

/// Classes shared by every server-side failure
fn on_server_path(class: ErrorClass) -> bool {
    matches!(
        class,
        ErrorClass::Client | ErrorClass::Connection | ErrorClass::ServerConnection
    )
}

/// Server closed the connection unexpectedly
#[derive(Debug, Clone, Default)]
pub struct ServerDisconnected {
    message: Option<String>,
}

impl ServerDisconnected {
    /// Create a disconnect error without detail
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disconnect error with a diagnostic message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Diagnostic message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ServerDisconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Server disconnected: {message}"),
            None => f.write_str("Server disconnected"),
        }
    }
}

impl std::error::Error for ServerDisconnected {}

impl Classify for ServerDisconnected {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ServerDisconnected
    }

    fn is(&self, class: ErrorClass) -> bool {
        on_server_path(class) || class == ErrorClass::ServerDisconnected
    }
}

/// Server did not respond within the deadline
#[derive(Debug, Clone, Default)]
pub struct ServerTimeout {
    message: Option<String>,
}

impl ServerTimeout {
    /// Create a timeout error without detail
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timeout error with a diagnostic message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Diagnostic message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ServerTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Server timeout: {message}"),
            None => f.write_str("Server timeout"),
        }
    }
}

impl std::error::Error for ServerTimeout {}

impl Classify for ServerTimeout {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ServerTimeout
    }

    fn is(&self, class: ErrorClass) -> bool {
        on_server_path(class) || matches!(class, ErrorClass::ServerTimeout | ErrorClass::Timeout)
    }
}

/// Server certificate did not match the pinned fingerprint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Server fingerprint mismatch expected={expected} got={got} host={host} port={port}")]
pub struct ServerFingerprintMismatch {
    expected: String,
    got: String,
    host: String,
    port: u16,
}

impl ServerFingerprintMismatch {
    /// Create a mismatch from already formatted fingerprints
    pub fn new(
        expected: impl Into<String>,
        got: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            expected: expected.into(),
            got: got.into(),
            host: host.into(),
            port,
        }
    }

    /// Create a mismatch from raw digests, formatted as colon-separated hex
    pub fn from_digests(expected: &[u8], got: &[u8], host: impl Into<String>, port: u16) -> Self {
        Self::new(hex_fingerprint(expected), hex_fingerprint(got), host, port)
    }

    /// Pinned fingerprint
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Fingerprint presented by the server
    #[must_use]
    pub fn got(&self) -> &str {
        &self.got
    }

    /// Server host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Classify for ServerFingerprintMismatch {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ServerFingerprintMismatch
    }

    fn is(&self, class: ErrorClass) -> bool {
        on_server_path(class) || class == ErrorClass::ServerFingerprintMismatch
    }
}

fn hex_fingerprint(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 3);
    for (i, byte) in digest.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// Error attributable to server behavior after the connection was made
#[derive(Error, Debug, Clone)]
pub enum ServerConnectionError {
    /// Server closed the connection
    #[error(transparent)]
    Disconnected(#[from] ServerDisconnected),

    /// Server did not answer in time
    #[error(transparent)]
    Timeout(#[from] ServerTimeout),

    /// Server certificate fingerprint mismatch
    #[error(transparent)]
    FingerprintMismatch(#[from] ServerFingerprintMismatch),
}

impl Classify for ServerConnectionError {
    fn kind(&self) -> ErrorClass {
        match self {
            ServerConnectionError::Disconnected(err) => err.kind(),
            ServerConnectionError::Timeout(err) => err.kind(),
            ServerConnectionError::FingerprintMismatch(err) => err.kind(),
        }
    }

    fn is(&self, class: ErrorClass) -> bool {
        match self {
            ServerConnectionError::Disconnected(err) => err.is(class),
            ServerConnectionError::Timeout(err) => err.is(class),
            ServerConnectionError::FingerprintMismatch(err) => err.is(class),
        }
    }
}
