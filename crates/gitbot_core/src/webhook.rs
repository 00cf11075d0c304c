//! Validation of inbound `issues` webhook deliveries.
//!
//! A delivery is turned into one of three results: a [`Ticket`] to process,
//! an action the bot deliberately ignores, or a rejection because the body
//! is not a usable issue event. Signature checks happen before this step,
//! see [`crate::signature`].

use github_client::webhook::IssuesEventPayload;
use thiserror::Error;

use crate::errors::{RepositoryRefError, TicketParseError};
use crate::repository::RepositoryRef;
use crate::ticket::Ticket;

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

/// Issue actions that trigger labelling.
pub const ACCEPTED_ACTIONS: [&str; 2] = ["opened", "edited"];

/// What to do with a validated delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDisposition {
    /// Label this ticket.
    Process { action: String, ticket: Ticket },

    /// The action is not one the bot reacts to.
    Ignore { action: String },
}

/// A delivery body that cannot be processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookRejection {
    #[error("Payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("Payload is missing '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidRepository(#[from] RepositoryRefError),

    #[error(transparent)]
    InvalidIssue(#[from] TicketParseError),
}

/// Parses and validates a raw delivery body.
pub fn parse_issue_event(body: &[u8]) -> Result<EventDisposition, WebhookRejection> {
    let payload: IssuesEventPayload =
        serde_json::from_slice(body).map_err(|e| WebhookRejection::Malformed(e.to_string()))?;
    validate_issue_event(payload)
}

/// Validates a deserialized delivery.
///
/// The action is checked first so ignored actions never need a complete
/// payload.
pub fn validate_issue_event(
    payload: IssuesEventPayload,
) -> Result<EventDisposition, WebhookRejection> {
    let action = payload
        .action
        .clone()
        .ok_or(WebhookRejection::MissingField("action"))?;

    if !ACCEPTED_ACTIONS.contains(&action.as_str()) {
        return Ok(EventDisposition::Ignore { action });
    }

    let repository: RepositoryRef = payload
        .repository_full_name()
        .ok_or(WebhookRejection::MissingField("repository.full_name"))?
        .parse()?;

    let issue = payload.issue.ok_or(WebhookRejection::MissingField("issue"))?;
    let ticket = Ticket::from_payload(issue, repository)?;

    Ok(EventDisposition::Process { action, ticket })
}
