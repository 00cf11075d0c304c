//! Error types for the labelling engine.
//!
//! Two families live here. Validation results (`RuleError`, `TicketParseError`,
//! `RepositoryRefError`) describe data that is malformed and gets skipped.
//! Faults (`RuleSourceError`, `TrackerError`) describe an environment that
//! failed: a missing rules file or an unreachable issue tracker.

use std::path::PathBuf;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// A rule definition that cannot be turned into a [`Rule`](crate::Rule).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The label part is empty after trimming.
    #[error("Rule label is empty")]
    EmptyLabel,

    /// The pattern part is not a valid regular expression.
    #[error("Invalid rule pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// The rule source as a whole is unavailable. Always fatal.
#[derive(Error, Debug)]
pub enum RuleSourceError {
    #[error("Rules file not found. Searched: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Failed to read rules file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An issue payload that lacks the data needed to process it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketParseError {
    #[error("Issue is missing required field '{0}'")]
    MissingField(&'static str),
}

/// A repository reference that is not of the form `owner/name`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid repository reference '{0}': expected 'owner/name'")]
pub struct RepositoryRefError(pub String);

/// Failure talking to the issue tracker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// No response was received.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The tracker answered with a non-success status.
    #[error("Remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// The tracker answered but the response could not be used.
    #[error("Unexpected response from tracker: {0}")]
    InvalidResponse(String),
}

impl From<github_client::Error> for TrackerError {
    fn from(value: github_client::Error) -> Self {
        match value {
            github_client::Error::Transport(msg) => TrackerError::Transport(msg),
            github_client::Error::Remote { status, message } => {
                TrackerError::Remote { status, message }
            }
            github_client::Error::RateLimitExceeded => TrackerError::Remote {
                status: 403,
                message: "Rate limit exceeded".to_string(),
            },
            other => match other.status() {
                Some(status) => TrackerError::Remote {
                    status,
                    message: other.to_string(),
                },
                None => TrackerError::InvalidResponse(other.to_string()),
            },
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
