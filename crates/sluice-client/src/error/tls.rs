//! TLS capability probe and TLS failure payloads
//!
//! The ssl and certificate connector variants only keep their TLS payload
//! when the process has TLS support. Support is compiled in through the
//! `tls` feature and can be switched off at runtime with [`TLS_ENV_VAR`].

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

/// Environment variable that disables TLS support when set to `0`, `false`,
/// `off` or `no`
pub const TLS_ENV_VAR: &str = "SLUICE_TLS";

static CAPABILITY: OnceLock<TlsCapability> = OnceLock::new();

/// Whether TLS failure detail can be attached to connector errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsCapability {
    /// TLS support is present; payloads are kept
    Available,
    /// TLS support is absent; payloads are dropped
    Unavailable,
}

impl TlsCapability {
    /// Check if TLS support is present
    #[must_use]
    pub fn is_available(self) -> bool {
        self == TlsCapability::Available
    }

    /// Decide the capability from the build and the value of [`TLS_ENV_VAR`]
    #[must_use]
    pub fn detect(compiled: bool, env_value: Option<&str>) -> Self {
        let disabled = env_value.is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            )
        });

        if compiled && !disabled {
            TlsCapability::Available
        } else {
            TlsCapability::Unavailable
        }
    }

    fn probe() -> Self {
        let compiled = cfg!(feature = "tls");
        let env_value = std::env::var(TLS_ENV_VAR).ok();
        let capability = Self::detect(compiled, env_value.as_deref());

        tracing::debug!(
            compiled,
            env = env_value.as_deref().unwrap_or("<unset>"),
            available = capability.is_available(),
            "probed TLS capability"
        );

        capability
    }
}

impl fmt::Display for TlsCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsCapability::Available => f.write_str("available"),
            TlsCapability::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Process-wide TLS capability
///
/// Probed on first call and fixed for the lifetime of the process.
pub fn tls_capability() -> TlsCapability {
    *CAPABILITY.get_or_init(TlsCapability::probe)
}

/// Detail of a failed TLS handshake or record-layer error
#[derive(Error, Debug, Clone)]
#[error("{reason}")]
pub struct TlsFailure {
    reason: String,
    #[cfg(feature = "tls")]
    rustls: Option<rustls::Error>,
}

impl TlsFailure {
    /// Create a failure from a plain description
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            #[cfg(feature = "tls")]
            rustls: None,
        }
    }

    /// Description of the failure
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Underlying rustls error, when the failure came from rustls
    #[cfg(feature = "tls")]
    #[must_use]
    pub fn rustls_error(&self) -> Option<&rustls::Error> {
        self.rustls.as_ref()
    }
}

#[cfg(feature = "tls")]
impl From<rustls::Error> for TlsFailure {
    fn from(err: rustls::Error) -> Self {
        Self {
            reason: err.to_string(),
            rustls: Some(err),
        }
    }
}

/// Detail of a failed certificate validation
#[derive(Error, Debug, Clone)]
#[error("{kind}: {message}")]
pub struct CertificateFailure {
    kind: String,
    message: String,
    #[cfg(feature = "tls")]
    rustls: Option<rustls::CertificateError>,
}

impl CertificateFailure {
    /// Create a failure from a short kind label and a description
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            #[cfg(feature = "tls")]
            rustls: None,
        }
    }

    /// Short label of the failure, e.g. `Expired` or `UnknownIssuer`
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Description of the failure
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying rustls certificate error, when the failure came from rustls
    #[cfg(feature = "tls")]
    #[must_use]
    pub fn rustls_error(&self) -> Option<&rustls::CertificateError> {
        self.rustls.as_ref()
    }
}

#[cfg(feature = "tls")]
impl From<rustls::CertificateError> for CertificateFailure {
    fn from(err: rustls::CertificateError) -> Self {
        use rustls::CertificateError as E;

        let (kind, message) = match &err {
            E::BadEncoding => ("BadEncoding", "certificate is not correctly encoded".to_string()),
            E::Expired => ("Expired", "certificate has expired".to_string()),
            E::NotValidYet => ("NotValidYet", "certificate is not valid yet".to_string()),
            E::Revoked => ("Revoked", "certificate has been revoked".to_string()),
            E::UnhandledCriticalExtension => (
                "UnhandledCriticalExtension",
                "certificate contains an unsupported critical extension".to_string(),
            ),
            E::UnknownIssuer => ("UnknownIssuer", "certificate issuer is unknown".to_string()),
            E::UnknownRevocationStatus => (
                "UnknownRevocationStatus",
                "certificate revocation status is unknown".to_string(),
            ),
            E::BadSignature => ("BadSignature", "certificate signature is invalid".to_string()),
            E::NotValidForName => (
                "NotValidForName",
                "certificate is not valid for the requested name".to_string(),
            ),
            E::InvalidPurpose => (
                "InvalidPurpose",
                "certificate is not valid for this purpose".to_string(),
            ),
            E::ApplicationVerificationFailure => (
                "ApplicationVerificationFailure",
                "certificate was rejected by the application".to_string(),
            ),
            E::Other(other) => ("Other", other.to_string()),
            _ => (
                "CertificateError",
                rustls::Error::InvalidCertificate(err.clone()).to_string(),
            ),
        };

        Self {
            kind: kind.to_string(),
            message,
            rustls: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_compiled() {
        assert_eq!(TlsCapability::detect(true, None), TlsCapability::Available);
        assert_eq!(
            TlsCapability::detect(true, Some("1")),
            TlsCapability::Available
        );
    }

    #[test]
    fn test_detect_disabled_by_env() {
        for value in ["0", "false", "OFF", " no "] {
            assert_eq!(
                TlsCapability::detect(true, Some(value)),
                TlsCapability::Unavailable,
                "{value}"
            );
        }
    }

    #[test]
    fn test_detect_not_compiled() {
        assert_eq!(
            TlsCapability::detect(false, None),
            TlsCapability::Unavailable
        );
        assert_eq!(
            TlsCapability::detect(false, Some("on")),
            TlsCapability::Unavailable
        );
    }

    #[test]
    fn test_probe_is_stable() {
        assert_eq!(tls_capability(), tls_capability());
    }

    #[test]
    fn test_certificate_failure_display() {
        let failure = CertificateFailure::new("Expired", "certificate expired");
        assert_eq!(failure.to_string(), "Expired: certificate expired");
        assert_eq!(failure.kind(), "Expired");
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_from_rustls_certificate_error() {
        let failure = CertificateFailure::from(rustls::CertificateError::UnknownIssuer);
        assert_eq!(failure.kind(), "UnknownIssuer");
        assert_eq!(failure.message(), "certificate issuer is unknown");
        assert!(failure.rustls_error().is_some());
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_from_rustls_other_certificate_error() {
        let other = rustls::OtherError(std::sync::Arc::new(std::io::Error::other("pin rejected")));
        let failure = CertificateFailure::from(rustls::CertificateError::Other(other));
        assert_eq!(failure.kind(), "Other");
        assert_eq!(failure.message(), "pin rejected");
        assert_eq!(failure.to_string(), "Other: pin rejected");
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_from_rustls_error() {
        let failure = TlsFailure::from(rustls::Error::DecryptError);
        assert!(!failure.reason().is_empty());
        assert_eq!(failure.rustls_error(), Some(&rustls::Error::DecryptError));
    }
}
