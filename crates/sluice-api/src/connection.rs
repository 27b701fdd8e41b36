//! Connection identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a connection attempt target
///
/// Built by the connector before dialing; the taxonomy only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionKey {
    /// Target host name or address literal
    pub host: String,
    /// Target port
    pub port: u16,
    /// Whether TLS was requested for this connection
    #[serde(default)]
    pub tls: bool,
}

impl ConnectionKey {
    /// Create a plain-text connection key
    ///
    /// The host is taken as given; the connector decides what it can dial.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            tls: false,
        }
    }

    /// Mark the connection as TLS-requested
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
