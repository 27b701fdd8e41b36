//! Category tags and the membership query

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named class a failure can belong to
///
/// Leaf classes name a single variant; the others group variants so callers
/// can handle failures at any granularity. A failure belongs to every class
/// on its path from the root plus its cross-cutting classes (`Timeout`,
/// `InvalidArgument`, `TlsFailure`, `CertificateFailure`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Any client failure
    Client,
    /// Failure interpreting a received response
    Response,
    /// Response content type was not acceptable
    ContentType,
    /// WebSocket upgrade was rejected
    WebSocketHandshake,
    /// CONNECT proxy answered with a non-200 status
    HttpProxy,
    /// Any transport connection failure
    Connection,
    /// Connection failure carrying an OS error
    OsConnection,
    /// Failure reaching a specific target
    Connector,
    /// Failure reaching the configured proxy
    ProxyConnection,
    /// Connector failure in the TLS layer
    ConnectorSsl,
    /// Connector failure validating the peer certificate
    ConnectorCertificate,
    /// Failure attributable to the server after connecting
    ServerConnection,
    /// Server closed the connection
    ServerDisconnected,
    /// Server did not answer in time
    ServerTimeout,
    /// Pinned fingerprint did not match the server certificate
    ServerFingerprintMismatch,
    /// Response body could not be consumed
    Payload,
    /// Supplied URL is malformed
    InvalidUrl,
    /// Any deadline expiry
    Timeout,
    /// Caller supplied an unusable value
    InvalidArgument,
    /// TLS-layer failure with TLS support present
    TlsFailure,
    /// Certificate validation failure with TLS support present
    CertificateFailure,
}

impl ErrorClass {
    /// Every class, in declaration order
    pub const ALL: [ErrorClass; 21] = [
        ErrorClass::Client,
        ErrorClass::Response,
        ErrorClass::ContentType,
        ErrorClass::WebSocketHandshake,
        ErrorClass::HttpProxy,
        ErrorClass::Connection,
        ErrorClass::OsConnection,
        ErrorClass::Connector,
        ErrorClass::ProxyConnection,
        ErrorClass::ConnectorSsl,
        ErrorClass::ConnectorCertificate,
        ErrorClass::ServerConnection,
        ErrorClass::ServerDisconnected,
        ErrorClass::ServerTimeout,
        ErrorClass::ServerFingerprintMismatch,
        ErrorClass::Payload,
        ErrorClass::InvalidUrl,
        ErrorClass::Timeout,
        ErrorClass::InvalidArgument,
        ErrorClass::TlsFailure,
        ErrorClass::CertificateFailure,
    ];

    /// Name used in diagnostics
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ErrorClass::Client => "ClientError",
            ErrorClass::Response => "ResponseError",
            ErrorClass::ContentType => "ContentTypeError",
            ErrorClass::WebSocketHandshake => "WebSocketHandshakeError",
            ErrorClass::HttpProxy => "HttpProxyError",
            ErrorClass::Connection => "ConnectionError",
            ErrorClass::OsConnection => "OsConnectionError",
            ErrorClass::Connector => "ConnectorError",
            ErrorClass::ProxyConnection => "ProxyConnectionError",
            ErrorClass::ConnectorSsl => "ConnectorSslError",
            ErrorClass::ConnectorCertificate => "ConnectorCertificateError",
            ErrorClass::ServerConnection => "ServerConnectionError",
            ErrorClass::ServerDisconnected => "ServerDisconnected",
            ErrorClass::ServerTimeout => "ServerTimeout",
            ErrorClass::ServerFingerprintMismatch => "ServerFingerprintMismatch",
            ErrorClass::Payload => "PayloadError",
            ErrorClass::InvalidUrl => "InvalidUrl",
            ErrorClass::Timeout => "Timeout",
            ErrorClass::InvalidArgument => "InvalidArgument",
            ErrorClass::TlsFailure => "TlsFailure",
            ErrorClass::CertificateFailure => "CertificateFailure",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category-membership query implemented by every failure type
pub trait Classify {
    /// Leaf class of this failure
    fn kind(&self) -> ErrorClass;

    /// Check whether this failure belongs to `class`
    fn is(&self, class: ErrorClass) -> bool;

    /// All classes this failure belongs to, in [`ErrorClass::ALL`] order
    fn classes(&self) -> Vec<ErrorClass> {
        ErrorClass::ALL
            .into_iter()
            .filter(|class| self.is(*class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_unique() {
        for (i, a) in ErrorClass::ALL.iter().enumerate() {
            for b in &ErrorClass::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ErrorClass::ServerFingerprintMismatch).unwrap();
        assert_eq!(json, "\"server_fingerprint_mismatch\"");
        let class: ErrorClass = serde_json::from_str("\"invalid_url\"").unwrap();
        assert_eq!(class, ErrorClass::InvalidUrl);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(ErrorClass::ConnectorSsl.to_string(), "ConnectorSslError");
    }
}
