//! HTTP response type definitions
//!
//! Every `/callback` response is a JSON object with a numeric `code` and a
//! human-readable `message`, so GitHub's delivery log shows why a delivery
//! was or was not processed.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Result codes of the `/callback` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackCode {
    /// The signature does not match the payload.
    WrongSignature = 1,
    /// No signature header was sent.
    MissingSignature = 2,
    /// The event or action is not one the bot reacts to.
    NotProcessed = 3,
    /// The body is not a usable issue event.
    MalformedPayload = 4,
    /// The issue was processed.
    Done = 5,
    /// The issue was processed but the labels could not be written.
    UpdateFailed = 6,
}

impl CallbackCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Body of every `/callback` response.
///
/// # Example
///
/// ```json
/// {
///   "code": 5,
///   "message": "Callback done",
///   "issue_number": 42,
///   "labels": ["bug", "help wanted"],
///   "outcome": "updated"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackResponse {
    pub code: u8,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,

    /// Labels the issue carries after processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// `updated`, `dry_run`, `unchanged` or `unmatched`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl CallbackResponse {
    pub fn new(code: CallbackCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u8(),
            message: message.into(),
            issue_number: None,
            labels: None,
            outcome: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
