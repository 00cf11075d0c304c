//! # Models
//!
//! Wire representations of the GitHub issue resources gitbot reads and writes.
//!
//! The structs mirror the JSON GitHub sends, but only carry the fields the
//! labelling workflow needs. Every field GitHub may omit is an `Option` so a
//! payload always deserializes; validating that the required fields are
//! present is the job of the domain layer.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a label on a pull request or issue.
///
/// # Examples
///
/// ```
/// use github_client::models::Label;
///
/// let label = Label {
///     name: "bug".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// The `state` filter accepted by the issue listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    All,
}

impl IssueState {
    /// Returns the query string value for the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::All => "all",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue as returned by `GET /repos/{owner}/{repo}/issues` or embedded in
/// an `issues` webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    /// API URL of the issue
    pub url: Option<String>,

    /// API URL listing the issue comments
    pub comments_url: Option<String>,

    /// Issue number within the repository
    pub number: Option<u64>,

    pub title: Option<String>,

    /// Markdown body, `null` when the issue was opened without a description
    pub body: Option<String>,

    /// `open` or `closed`
    pub state: Option<String>,

    /// Labels currently applied to the issue
    pub labels: Option<Vec<Label>>,
}

/// A single issue comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<u64>,

    /// Markdown body of the comment
    pub body: Option<String>,
}

/// Body of `PATCH /repos/{owner}/{repo}/issues/{number}` when replacing labels.
#[derive(Debug, Clone, Serialize)]
pub struct IssueLabelsUpdate<'a> {
    pub labels: &'a [String],
}
