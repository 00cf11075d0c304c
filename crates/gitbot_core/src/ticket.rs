//! Normalized issue representation used by the labelling engine.

use github_client::IssuePayload;

use crate::errors::TicketParseError;
use crate::repository::RepositoryRef;

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;

/// An issue, validated and ready for rule evaluation.
///
/// A `Ticket` is only ever built from a complete payload; a payload missing
/// any required field is rejected as a whole. Tickets are read-only while
/// labels are resolved and are discarded at the end of a processing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    number: u64,
    repository: RepositoryRef,
    title: String,
    body: String,
    current_labels: Vec<String>,
    is_open: bool,
    url: String,
    comments_url: String,
}

impl Ticket {
    /// Validates a raw issue payload into a ticket.
    ///
    /// `url`, `comments_url`, `number` and a non-empty `title` are required. A
    /// missing body becomes an empty string. The ticket is open when `state`
    /// is `"open"`. Labels keep their first-occurrence order and duplicates are
    /// dropped.
    ///
    /// # Errors
    ///
    /// `TicketParseError::MissingField` naming the first required field that is
    /// absent.
    pub fn from_payload(
        payload: IssuePayload,
        repository: RepositoryRef,
    ) -> Result<Self, TicketParseError> {
        let url = payload.url.ok_or(TicketParseError::MissingField("url"))?;
        let comments_url = payload
            .comments_url
            .ok_or(TicketParseError::MissingField("comments_url"))?;
        let title = payload
            .title
            .filter(|t| !t.is_empty())
            .ok_or(TicketParseError::MissingField("title"))?;
        let number = payload
            .number
            .ok_or(TicketParseError::MissingField("number"))?;

        let mut current_labels: Vec<String> = Vec::new();
        for label in payload.labels.unwrap_or_default() {
            if !current_labels.contains(&label.name) {
                current_labels.push(label.name);
            }
        }

        Ok(Self {
            number,
            repository,
            title,
            body: payload.body.unwrap_or_default(),
            current_labels,
            is_open: payload.state.as_deref() == Some("open"),
            url,
            comments_url,
        })
    }

    /// Issue number within its repository.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Labels applied to the issue at fetch time.
    pub fn current_labels(&self) -> &[String] {
        &self.current_labels
    }

    pub fn has_labels(&self) -> bool {
        !self.current_labels.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// API URL of the issue.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// API URL listing the comments of the issue.
    pub fn comments_url(&self) -> &str {
        &self.comments_url
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}
