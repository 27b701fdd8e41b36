//! Response body failures

use std::fmt;

use super::class::{Classify, ErrorClass};

/// Response body could not be decoded or consumed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadError {
    message: String,
}

impl PayloadError {
    /// Create a payload error with a diagnostic message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Diagnostic message, empty when none was given
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str("Response payload error")
        } else {
            write!(f, "Response payload error: {}", self.message)
        }
    }
}

impl std::error::Error for PayloadError {}

impl Classify for PayloadError {
    fn kind(&self) -> ErrorClass {
        ErrorClass::Payload
    }

    fn is(&self, class: ErrorClass) -> bool {
        matches!(class, ErrorClass::Client | ErrorClass::Payload)
    }
}
