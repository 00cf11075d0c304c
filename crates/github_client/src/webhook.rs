//! GitHub webhook delivery types.
//!
//! Only the parts of a delivery that gitbot reacts to are modelled: the event
//! name sent in the `X-GitHub-Event` header and the body of an `issues` event.

use serde::{Deserialize, Serialize};

use crate::models::IssuePayload;

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

/// Header carrying the event name of a delivery.
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the HMAC-SHA256 signature of a delivery body.
pub const SIGNATURE_256_HEADER: &str = "x-hub-signature-256";

/// Header carrying the legacy HMAC-SHA1 signature of a delivery body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature";

/// GitHub webhook event types.
///
/// See [GitHub webhook events documentation](https://docs.github.com/en/webhooks/webhook-events-and-payloads).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    /// Activity related to issues
    Issues,
    /// Activity related to issue comments
    IssueComment,
    /// Sent once when a webhook is created
    Ping,
    /// Any event gitbot does not handle
    Other(String),
}

impl WebhookEvent {
    /// Converts the `X-GitHub-Event` header value to a WebhookEvent.
    pub fn from_header(s: &str) -> Self {
        match s {
            "issues" => Self::Issues,
            "issue_comment" => Self::IssueComment,
            "ping" => Self::Ping,
            other => Self::Other(other.to_string()),
        }
    }

    /// Converts the WebhookEvent to a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Issues => "issues",
            Self::IssueComment => "issue_comment",
            Self::Ping => "ping",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The repository block of a webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPayload {
    /// `owner/name`
    pub full_name: Option<String>,
}

/// Body of an `issues` webhook delivery.
///
/// All fields are optional; deliveries for other event kinds deserialize into
/// this type with the missing parts left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuesEventPayload {
    /// `opened`, `edited`, `labeled`, ...
    pub action: Option<String>,

    pub issue: Option<IssuePayload>,

    pub repository: Option<RepositoryPayload>,
}

impl IssuesEventPayload {
    /// Returns the `owner/name` of the repository the delivery is about.
    pub fn repository_full_name(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|r| r.full_name.as_deref())
    }
}
