//! The `{success, message, errorCode, data}` wrapper used by every response

use serde::{Deserialize, Serialize};

/// Uniform response wrapper
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the server considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Human-readable status message
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable error code, rarely populated
    #[serde(default)]
    pub error_code: Option<String>,
    /// Payload
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope around a payload
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: Some("OK".to_string()),
            error_code: None,
            data: Some(data),
        }
    }

    /// Rejected envelope with a message
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error_code: None,
            data: None,
        }
    }
}
