//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Callers use the variants to tell a transport failure
//! (GitHub could not be reached) apart from a remote failure (GitHub answered with a
//! non-success status).

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_issues("octo", "repo", IssueState::Open).await {
///     Ok(issues) => println!("Fetched {} issues", issues.len()),
///     Err(Error::Remote { status, message }) => eprintln!("GitHub said {status}: {message}"),
///     Err(Error::Transport(msg)) => eprintln!("Could not reach GitHub: {msg}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure, it never
    /// contains the credential itself.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// A URL handed to the client could not be turned into an API route.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested resource (repository, issue, etc.)
    /// does not exist or is not accessible with the current authentication.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// GitHub answered with a non-success status code.
    ///
    /// Carries the HTTP status and the message GitHub put in the error body.
    #[error("GitHub returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS, TLS, timeout).
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),
}

impl Error {
    /// Returns the HTTP status code associated with the error, if GitHub sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound => Some(404),
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
