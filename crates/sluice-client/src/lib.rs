//! sluice-client: Failure classification for the sluice HTTP client
//!
//! Defines what a client failure is and what it carries: malformed input,
//! transport and TLS failures, server misbehavior, and unacceptable
//! responses or payloads. Raising, retrying and logging are left to callers.
//!
//! # Examples
//!
//! ```
//! use sluice_api::ConnectionKey;
//! use sluice_client::{ClientError, Classify, ConnectorError, ErrorClass, OsError};
//!
//! let key = ConnectionKey::new("example.com", 443).with_tls(true);
//! let err: ClientError = ConnectorError::new(key, OsError::new(61, "Connection refused")).into();
//!
//! assert!(err.is(ErrorClass::Connection));
//! assert_eq!(
//!     err.to_string(),
//!     "Cannot connect to host example.com:443 tls:true [Connection refused]"
//! );
//! ```
//!
//! ## Handling at different granularity
//!
//! ```
//! use sluice_client::{ClientError, Classify, ErrorClass, ServerTimeout};
//!
//! fn describe(err: &ClientError) -> &'static str {
//!     if err.is(ErrorClass::Timeout) {
//!         "timed out"
//!     } else if err.is(ErrorClass::Connection) {
//!         "transport failure"
//!     } else {
//!         "other failure"
//!     }
//! }
//!
//! assert_eq!(describe(&ServerTimeout::new().into()), "timed out");
//! ```

pub mod error;
pub mod report;

pub use error::{
    CertificateFailure, Classify, ClientError, ConnectionError, ConnectorCertificateError,
    ConnectorError, ConnectorSslError, ErrorClass, InvalidUrl, OsConnectionError, OsError,
    PayloadError, ProxyConnectionError, ResponseError, ResponseErrorKind, Result,
    ServerConnectionError, ServerDisconnected, ServerFingerprintMismatch, ServerTimeout,
    TLS_ENV_VAR, TlsCapability, TlsFailure, parse_url, tls_capability,
};
pub use report::ErrorReport;
