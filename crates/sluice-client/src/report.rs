//! Structured diagnostic snapshot of a failure

use serde::Serialize;

use crate::error::{ClientError, Classify, ErrorClass};

/// Serializable view of a [`ClientError`] for structured log pipelines
///
/// Every field is derived from the error at the time [`ClientError::report`]
/// is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Leaf class
    pub kind: ErrorClass,
    /// Every class the failure belongs to
    pub classes: Vec<ErrorClass>,
    /// One-line diagnostic
    pub message: String,
    /// Target host, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Target port, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// OS errno, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_code: Option<i32>,
    /// Response status, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Number of redirects followed before the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirects: Option<usize>,
}

impl ClientError {
    /// Build a structured snapshot of this failure
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        let key = self.connection_key();
        let (status, redirects) = match self {
            ClientError::Response(err) => (
                Some(err.status()).filter(|status| *status != 0),
                Some(err.history().len()),
            ),
            _ => (None, None),
        };

        ErrorReport {
            kind: self.kind(),
            classes: self.classes(),
            message: self.to_string(),
            host: key.map(|key| key.host.clone()),
            port: key.map(|key| key.port),
            os_code: self.os_error().and_then(|err| err.code()),
            status,
            redirects,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sluice_api::ConnectionKey;

    use super::*;
    use crate::error::{ConnectorError, OsError, ServerDisconnected};

    #[test]
    fn test_connector_report() {
        let err: ClientError = ConnectorError::new(
            ConnectionKey::new("example.com", 443).with_tls(true),
            OsError::new(61, "Connection refused"),
        )
        .into();

        let value = serde_json::to_value(err.report()).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "connector",
                "classes": ["client", "connection", "os_connection", "connector"],
                "message": "Cannot connect to host example.com:443 tls:true [Connection refused]",
                "host": "example.com",
                "port": 443,
                "os_code": 61,
            })
        );
    }

    #[test]
    fn test_report_skips_unknown_fields() {
        let err: ClientError = ServerDisconnected::new().into();
        let report = err.report();
        assert_eq!(report.kind, ErrorClass::ServerDisconnected);
        assert!(report.host.is_none());

        let value = serde_json::to_value(report).unwrap();
        assert!(value.get("host").is_none());
        assert!(value.get("status").is_none());
    }
}
