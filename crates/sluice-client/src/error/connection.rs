//! Transport connection failures

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;

use sluice_api::ConnectionKey;
use thiserror::Error;

use super::class::{Classify, ErrorClass};
use super::server::ServerConnectionError;
use super::tls::{CertificateFailure, TlsCapability, TlsFailure, tls_capability};

/// OS-level error code and description reported by the socket layer
#[derive(Error, Debug, Clone)]
#[error("{description}")]
pub struct OsError {
    code: Option<i32>,
    description: String,
    source: Option<Arc<io::Error>>,
}

impl OsError {
    /// Create an error from an errno value and its description
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            description: description.into(),
            source: None,
        }
    }

    /// Create an error that has no errno value
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            code: None,
            description: description.into(),
            source: None,
        }
    }

    /// Errno value, if the OS reported one
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Portable kind of the error
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match (&self.source, self.code) {
            (Some(source), _) => source.kind(),
            (None, Some(code)) => io::Error::from_raw_os_error(code).kind(),
            (None, None) => io::ErrorKind::Other,
        }
    }
}

impl From<io::Error> for OsError {
    fn from(err: io::Error) -> Self {
        let code = err.raw_os_error();
        let text = err.to_string();
        let description = match code {
            Some(code) => text
                .strip_suffix(&format!(" (os error {code})"))
                .unwrap_or(&text)
                .to_string(),
            None => text,
        };

        Self {
            code,
            description,
            source: Some(Arc::new(err)),
        }
    }
}

/// Connection failure surfaced as an OS error without a known target
#[derive(Debug, Clone)]
pub struct OsConnectionError {
    os_error: OsError,
}

impl OsConnectionError {
    /// Wrap an OS error
    pub fn new(os_error: impl Into<OsError>) -> Self {
        Self {
            os_error: os_error.into(),
        }
    }

    /// Underlying OS error
    #[must_use]
    pub fn os_error(&self) -> &OsError {
        &self.os_error
    }
}

impl fmt::Display for OsConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.os_error.code() {
            Some(code) => write!(f, "[Errno {code}] {}", self.os_error),
            None => write!(f, "[Errno ?] {}", self.os_error),
        }
    }
}

impl StdError for OsConnectionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.os_error)
    }
}

impl Classify for OsConnectionError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::OsConnection
    }

    fn is(&self, class: ErrorClass) -> bool {
        matches!(
            class,
            ErrorClass::Client | ErrorClass::Connection | ErrorClass::OsConnection
        )
    }
}

/// Classes shared by everything that failed reaching a target
fn on_connector_path(class: ErrorClass) -> bool {
    matches!(
        class,
        ErrorClass::Client
            | ErrorClass::Connection
            | ErrorClass::OsConnection
            | ErrorClass::Connector
    )
}

/// Failure reaching a specific target
#[derive(Error, Debug, Clone)]
#[error(
    "Cannot connect to host {}:{} tls:{} [{}]",
    .key.host,
    .key.port,
    .key.tls,
    .os_error
)]
pub struct ConnectorError {
    key: ConnectionKey,
    #[source]
    os_error: OsError,
}

impl ConnectorError {
    /// Create a connector error for `key`
    pub fn new(key: ConnectionKey, os_error: impl Into<OsError>) -> Self {
        Self {
            key,
            os_error: os_error.into(),
        }
    }

    /// Identity of the connection attempt
    #[must_use]
    pub fn connection_key(&self) -> &ConnectionKey {
        &self.key
    }

    /// Target host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.key.host
    }

    /// Target port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.key.port
    }

    /// Whether TLS was requested
    #[must_use]
    pub fn tls(&self) -> bool {
        self.key.tls
    }

    /// Underlying OS error
    #[must_use]
    pub fn os_error(&self) -> &OsError {
        &self.os_error
    }
}

impl Classify for ConnectorError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::Connector
    }

    fn is(&self, class: ErrorClass) -> bool {
        on_connector_path(class)
    }
}

/// Failure reaching the configured proxy
#[derive(Error, Debug, Clone)]
#[error(transparent)]
pub struct ProxyConnectionError(ConnectorError);

impl ProxyConnectionError {
    /// Create a proxy connection error for the proxy at `key`
    pub fn new(key: ConnectionKey, os_error: impl Into<OsError>) -> Self {
        Self(ConnectorError::new(key, os_error))
    }

    /// Connector view of this failure
    #[must_use]
    pub fn connector(&self) -> &ConnectorError {
        &self.0
    }

    /// Proxy host
    #[must_use]
    pub fn host(&self) -> &str {
        self.0.host()
    }

    /// Proxy port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.0.port()
    }

    /// Whether TLS was requested towards the proxy
    #[must_use]
    pub fn tls(&self) -> bool {
        self.0.tls()
    }

    /// Underlying OS error
    #[must_use]
    pub fn os_error(&self) -> &OsError {
        self.0.os_error()
    }
}

impl Classify for ProxyConnectionError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ProxyConnection
    }

    fn is(&self, class: ErrorClass) -> bool {
        on_connector_path(class) || class == ErrorClass::ProxyConnection
    }
}

/// Connector failure in the TLS layer
///
/// The TLS payload is only kept when TLS support is available; without it
/// the error classifies as an invalid argument instead of a TLS failure.
#[derive(Debug, Clone)]
pub struct ConnectorSslError {
    connector: ConnectorError,
    tls_failure: Option<TlsFailure>,
    capability: TlsCapability,
}

impl ConnectorSslError {
    /// Create an ssl error using the process-wide TLS capability
    pub fn new(
        key: ConnectionKey,
        os_error: impl Into<OsError>,
        tls_failure: TlsFailure,
    ) -> Self {
        Self::with_capability(tls_capability(), key, os_error, tls_failure)
    }

    /// Create an ssl error against an explicit TLS capability
    ///
    /// Bypasses the process-wide probe. Meant for tests and for embedders
    /// that detect TLS support themselves; regular callers use [`Self::new`]
    /// so every ssl error in the process has the same shape.
    pub fn with_capability(
        capability: TlsCapability,
        key: ConnectionKey,
        os_error: impl Into<OsError>,
        tls_failure: TlsFailure,
    ) -> Self {
        Self {
            connector: ConnectorError::new(key, os_error),
            tls_failure: capability.is_available().then_some(tls_failure),
            capability,
        }
    }

    /// Create an ssl error from a rustls failure
    #[cfg(feature = "tls")]
    pub fn from_rustls(key: ConnectionKey, err: rustls::Error) -> Self {
        let os_error = OsError::from_description(err.to_string());
        Self::new(key, os_error, err.into())
    }

    /// Connector view of this failure
    #[must_use]
    pub fn connector(&self) -> &ConnectorError {
        &self.connector
    }

    /// TLS detail, present only with TLS support
    #[must_use]
    pub fn tls_failure(&self) -> Option<&TlsFailure> {
        self.tls_failure.as_ref()
    }

    /// TLS capability the error was built against
    #[must_use]
    pub fn capability(&self) -> TlsCapability {
        self.capability
    }

    /// Target host
    #[must_use]
    pub fn host(&self) -> &str {
        self.connector.host()
    }

    /// Target port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.connector.port()
    }

    /// Whether TLS was requested
    #[must_use]
    pub fn tls(&self) -> bool {
        self.connector.tls()
    }

    /// Underlying OS error
    #[must_use]
    pub fn os_error(&self) -> &OsError {
        self.connector.os_error()
    }
}

impl fmt::Display for ConnectorSslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.connector, f)
    }
}

impl StdError for ConnectorSslError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.tls_failure {
            Some(failure) => Some(failure),
            None => Some(self.connector.os_error()),
        }
    }
}

impl Classify for ConnectorSslError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ConnectorSsl
    }

    fn is(&self, class: ErrorClass) -> bool {
        match class {
            ErrorClass::ConnectorSsl => true,
            ErrorClass::TlsFailure => self.capability.is_available(),
            ErrorClass::InvalidArgument => !self.capability.is_available(),
            other => on_connector_path(other),
        }
    }
}

/// Connector failure validating the peer certificate
///
/// Like [`ConnectorSslError`], the certificate payload is dropped when TLS
/// support is unavailable and the error then classifies as an invalid
/// argument.
#[derive(Debug, Clone)]
pub struct ConnectorCertificateError {
    key: ConnectionKey,
    certificate_failure: Option<CertificateFailure>,
    capability: TlsCapability,
}

impl ConnectorCertificateError {
    /// Create a certificate error using the process-wide TLS capability
    pub fn new(key: ConnectionKey, certificate_failure: CertificateFailure) -> Self {
        Self::with_capability(tls_capability(), key, certificate_failure)
    }

    /// Create a certificate error against an explicit TLS capability
    ///
    /// Bypasses the process-wide probe, like
    /// [`ConnectorSslError::with_capability`].
    pub fn with_capability(
        capability: TlsCapability,
        key: ConnectionKey,
        certificate_failure: CertificateFailure,
    ) -> Self {
        Self {
            key,
            certificate_failure: capability.is_available().then_some(certificate_failure),
            capability,
        }
    }

    /// Create a certificate error from a rustls certificate failure
    #[cfg(feature = "tls")]
    pub fn from_rustls(key: ConnectionKey, err: rustls::CertificateError) -> Self {
        Self::new(key, err.into())
    }

    /// Identity of the connection attempt
    #[must_use]
    pub fn connection_key(&self) -> &ConnectionKey {
        &self.key
    }

    /// Certificate detail, present only with TLS support
    #[must_use]
    pub fn certificate_failure(&self) -> Option<&CertificateFailure> {
        self.certificate_failure.as_ref()
    }

    /// TLS capability the error was built against
    #[must_use]
    pub fn capability(&self) -> TlsCapability {
        self.capability
    }

    /// Target host
    #[must_use]
    pub fn host(&self) -> &str {
        &self.key.host
    }

    /// Target port
    #[must_use]
    pub fn port(&self) -> u16 {
        self.key.port
    }

    /// Whether TLS was requested
    #[must_use]
    pub fn tls(&self) -> bool {
        self.key.tls
    }
}

impl fmt::Display for ConnectorCertificateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot connect to host {}:{} tls:{} ",
            self.key.host, self.key.port, self.key.tls
        )?;
        match &self.certificate_failure {
            Some(failure) => write!(f, "[{failure}]"),
            None => f.write_str("[certificate verification unavailable]"),
        }
    }
}

impl StdError for ConnectorCertificateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.certificate_failure
            .as_ref()
            .map(|failure| failure as &(dyn StdError + 'static))
    }
}

impl Classify for ConnectorCertificateError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::ConnectorCertificate
    }

    fn is(&self, class: ErrorClass) -> bool {
        match class {
            ErrorClass::ConnectorCertificate => true,
            ErrorClass::CertificateFailure => self.capability.is_available(),
            ErrorClass::InvalidArgument => !self.capability.is_available(),
            other => on_connector_path(other),
        }
    }
}

/// Any failure establishing or keeping a transport connection
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// OS error without a known target
    #[error(transparent)]
    Os(#[from] OsConnectionError),

    /// Target could not be reached
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// Proxy could not be reached
    #[error(transparent)]
    ProxyConnection(#[from] ProxyConnectionError),

    /// TLS layer failed while connecting
    #[error(transparent)]
    Ssl(#[from] ConnectorSslError),

    /// Peer certificate failed validation
    #[error(transparent)]
    Certificate(#[from] ConnectorCertificateError),

    /// Server misbehaved after the connection was established
    #[error(transparent)]
    Server(#[from] ServerConnectionError),
}

impl ConnectionError {
    /// Identity of the failed connection attempt, when one is known
    #[must_use]
    pub fn connection_key(&self) -> Option<&ConnectionKey> {
        match self {
            ConnectionError::Connector(err) => Some(err.connection_key()),
            ConnectionError::ProxyConnection(err) => Some(err.connector().connection_key()),
            ConnectionError::Ssl(err) => Some(err.connector().connection_key()),
            ConnectionError::Certificate(err) => Some(err.connection_key()),
            ConnectionError::Os(_) | ConnectionError::Server(_) => None,
        }
    }

    /// Underlying OS error, when one is attached
    #[must_use]
    pub fn os_error(&self) -> Option<&OsError> {
        match self {
            ConnectionError::Os(err) => Some(err.os_error()),
            ConnectionError::Connector(err) => Some(err.os_error()),
            ConnectionError::ProxyConnection(err) => Some(err.os_error()),
            ConnectionError::Ssl(err) => Some(err.os_error()),
            ConnectionError::Certificate(_) | ConnectionError::Server(_) => None,
        }
    }
}

impl Classify for ConnectionError {
    fn kind(&self) -> ErrorClass {
        match self {
            ConnectionError::Os(err) => err.kind(),
            ConnectionError::Connector(err) => err.kind(),
            ConnectionError::ProxyConnection(err) => err.kind(),
            ConnectionError::Ssl(err) => err.kind(),
            ConnectionError::Certificate(err) => err.kind(),
            ConnectionError::Server(err) => err.kind(),
        }
    }

    fn is(&self, class: ErrorClass) -> bool {
        match self {
            ConnectionError::Os(err) => err.is(class),
            ConnectionError::Connector(err) => err.is(class),
            ConnectionError::ProxyConnection(err) => err.is(class),
            ConnectionError::Ssl(err) => err.is(class),
            ConnectionError::Certificate(err) => err.is(class),
            ConnectionError::Server(err) => err.is(class),
        }
    }
}
