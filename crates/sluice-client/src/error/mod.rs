//! Failure taxonomy for the sluice HTTP client
//!
//! Every failure is a leaf of a two-level tree rooted at [`ClientError`].
//! Callers can `match` on the tree directly or ask coarse questions through
//! [`Classify`], e.g. `err.is(ErrorClass::Connection)`.

use sluice_api::{ConnectionKey, RequestInfo, ResponseHistory};
use thiserror::Error;

pub mod class;
pub mod connection;
pub mod invalid_url;
pub mod payload;
pub mod response;
pub mod server;
pub mod tls;

pub use class::{Classify, ErrorClass};
pub use connection::{
    ConnectionError, ConnectorCertificateError, ConnectorError, ConnectorSslError,
    OsConnectionError, OsError, ProxyConnectionError,
};
pub use invalid_url::{InvalidUrl, parse_url};
pub use payload::PayloadError;
pub use response::{ResponseError, ResponseErrorKind};
pub use server::{
    ServerConnectionError, ServerDisconnected, ServerFingerprintMismatch, ServerTimeout,
};
pub use tls::{CertificateFailure, TLS_ENV_VAR, TlsCapability, TlsFailure, tls_capability};

/// Any failure originating in the client
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Received response could not be accepted
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Transport connection failed
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Response body could not be consumed
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Supplied URL is malformed
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

macro_rules! from_connection_leaf {
    ($($leaf:ty),* $(,)?) => {
        $(
            impl From<$leaf> for ClientError {
                fn from(err: $leaf) -> Self {
                    ClientError::Connection(ConnectionError::from(err))
                }
            }
        )*
    };
}

from_connection_leaf!(
    OsConnectionError,
    ConnectorError,
    ProxyConnectionError,
    ConnectorSslError,
    ConnectorCertificateError,
    ServerConnectionError,
);

macro_rules! from_server_leaf {
    ($($leaf:ty),* $(,)?) => {
        $(
            impl From<$leaf> for ClientError {
                fn from(err: $leaf) -> Self {
                    ClientError::Connection(ConnectionError::Server(err.into()))
                }
            }
        )*
    };
}

from_server_leaf!(ServerDisconnected, ServerTimeout, ServerFingerprintMismatch);

impl ClientError {
    /// Check if this is a transport connection failure
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        self.is(ErrorClass::Connection)
    }

    /// Check if this failure is attributable to the server
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.is(ErrorClass::ServerConnection)
    }

    /// Check if this failure concerns a received response
    #[must_use]
    pub fn is_response_error(&self) -> bool {
        self.is(ErrorClass::Response)
    }

    /// Check if a deadline expired
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.is(ErrorClass::Timeout)
    }

    /// Check if the caller supplied an unusable value
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        self.is(ErrorClass::InvalidArgument)
    }

    /// Check if the TLS layer failed
    #[must_use]
    pub fn is_tls_failure(&self) -> bool {
        self.is(ErrorClass::TlsFailure)
    }

    /// Check if certificate validation failed
    #[must_use]
    pub fn is_certificate_failure(&self) -> bool {
        self.is(ErrorClass::CertificateFailure)
    }

    /// Check if the failure is usually transient
    ///
    /// Plain connect failures, disconnects and timeouts qualify. TLS,
    /// certificate and fingerprint failures do not, nor does anything outside
    /// the connection category.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorClass::OsConnection
                | ErrorClass::Connector
                | ErrorClass::ProxyConnection
                | ErrorClass::ServerDisconnected
                | ErrorClass::ServerTimeout
        )
    }

    /// Identity of the failed connection attempt, when one is known
    #[must_use]
    pub fn connection_key(&self) -> Option<&ConnectionKey> {
        match self {
            ClientError::Connection(err) => err.connection_key(),
            _ => None,
        }
    }

    /// Underlying OS error, when one is attached
    #[must_use]
    pub fn os_error(&self) -> Option<&OsError> {
        match self {
            ClientError::Connection(err) => err.os_error(),
            _ => None,
        }
    }

    /// Request that produced the failing response
    #[must_use]
    pub fn request_info(&self) -> Option<&RequestInfo> {
        match self {
            ClientError::Response(err) => Some(err.request_info()),
            _ => None,
        }
    }

    /// Responses received before the failing one
    #[must_use]
    pub fn history(&self) -> Option<&ResponseHistory> {
        match self {
            ClientError::Response(err) => Some(err.history()),
            _ => None,
        }
    }
}

impl Classify for ClientError {
    fn kind(&self) -> ErrorClass {
        match self {
            ClientError::Response(err) => err.kind(),
            ClientError::Connection(err) => err.kind(),
            ClientError::Payload(err) => err.kind(),
            ClientError::InvalidUrl(err) => err.kind(),
        }
    }

    fn is(&self, class: ErrorClass) -> bool {
        match self {
            ClientError::Response(err) => err.is(class),
            ClientError::Connection(err) => err.is(class),
            ClientError::Payload(err) => err.is(class),
            ClientError::InvalidUrl(err) => err.is(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ConnectionKey {
        ConnectionKey::new("example.com", 443).with_tls(true)
    }

    #[test]
    fn test_leaf_conversions() {
        let err: ClientError = ServerTimeout::new().into();
        assert!(matches!(
            err,
            ClientError::Connection(ConnectionError::Server(ServerConnectionError::Timeout(_)))
        ));

        let err: ClientError = ProxyConnectionError::new(key(), OsError::new(61, "refused")).into();
        assert!(matches!(
            err,
            ClientError::Connection(ConnectionError::ProxyConnection(_))
        ));
    }

    #[test]
    fn test_predicates() {
        let err: ClientError = ServerTimeout::new().into();
        assert!(err.is_timeout());
        assert!(err.is_server_error());
        assert!(err.is_connection_error());
        assert!(!err.is_response_error());
        assert!(err.is_transient());

        let err: ClientError = InvalidUrl::new("::").into();
        assert!(err.is_invalid_argument());
        assert!(!err.is_connection_error());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_fingerprint_and_certificate_not_transient() {
        let err: ClientError = ServerFingerprintMismatch::new("AA", "BB", "h", 1).into();
        assert!(!err.is_transient());

        let err: ClientError =
            ConnectorCertificateError::with_capability(
                TlsCapability::Available,
                key(),
                CertificateFailure::new("UnknownIssuer", "unknown issuer"),
            )
            .into();
        assert!(!err.is_transient());
        assert!(err.is_certificate_failure());
    }

    #[test]
    fn test_accessors() {
        let err: ClientError = ConnectorError::new(key(), OsError::new(61, "refused")).into();
        assert_eq!(err.connection_key(), Some(&key()));
        assert_eq!(err.os_error().and_then(OsError::code), Some(61));
        assert!(err.request_info().is_none());
        assert!(err.history().is_none());

        let err: ClientError = PayloadError::new("truncated").into();
        assert!(err.connection_key().is_none());
        assert!(err.os_error().is_none());
    }
}
