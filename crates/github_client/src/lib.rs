//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for the issue endpoints gitbot needs: listing
//! the issues of a repository, listing the comments of an issue and replacing
//! the labels of an issue. Requests are authenticated with a personal access
//! token.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Comment, IssuePayload, IssueState, Label};

pub mod webhook;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of items requested per page from list endpoints. GitHub caps this at 100.
const PAGE_SIZE: usize = 100;

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an authenticated `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build the `Octocrab` instance from a
    /// personal access token.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every page of a list endpoint.
    async fn get_all_pages<T>(&self, route: &str, state: Option<IssueState>) -> Result<Vec<T>, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let query = ListQuery {
                state: state.map(|s| s.as_str()),
                per_page: PAGE_SIZE,
                page,
            };

            debug!(route = route, page = page, "Requesting page");
            let result: OctocrabResult<Vec<T>> = self.client.get(route, Some(&query)).await;
            let batch = result.map_err(|e| {
                let mapped = map_octocrab_error(&e);
                log_octocrab_error("Failed to list items", e);
                mapped
            })?;

            let received = batch.len();
            items.extend(batch);

            if received < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    per_page: usize,
    page: u32,
}

/// Issue operations used by the labelling workflow.
#[async_trait]
pub trait IssueClient: Send + Sync {
    /// Lists all issues of a repository in the given state.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `state` - Which issues to return.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` when GitHub cannot be reached and
    /// `Error::Remote`/`Error::NotFound` when GitHub answers with an error status.
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: IssueState,
    ) -> Result<Vec<IssuePayload>, Error>;

    /// Lists all comments of an issue.
    ///
    /// # Arguments
    ///
    /// * `comments_url` - The `comments_url` GitHub reported for the issue. Absolute
    ///   URLs are reduced to their path so the configured API base is used.
    async fn list_issue_comments(&self, comments_url: &str) -> Result<Vec<Comment>, Error>;

    /// Replaces the labels of an issue with `labels`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Remote` if GitHub rejects the update.
    async fn replace_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}

#[async_trait]
impl IssueClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, state = %state))]
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: IssueState,
    ) -> Result<Vec<IssuePayload>, Error> {
        let route = format!("/repos/{}/{}/issues", owner, repo);
        info!(route = route, "Fetching issues");

        let issues: Vec<IssuePayload> = self.get_all_pages(&route, Some(state)).await?;

        info!(count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    #[instrument(skip(self))]
    async fn list_issue_comments(&self, comments_url: &str) -> Result<Vec<Comment>, Error> {
        let route = api_route(comments_url)?;
        let comments: Vec<Comment> = self.get_all_pages(&route, None).await?;

        debug!(count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    async fn replace_issue_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/issues/{}", owner, repo, number);
        debug!(path = path, labels = ?labels, "Sending PATCH");

        let payload = models::IssueLabelsUpdate { labels };
        let response: OctocrabResult<serde_json::Value> =
            self.client.patch(path, Some(&payload)).await;
        match response {
            Ok(_) => Ok(()),
            Err(e) => {
                let mapped = map_octocrab_error(&e);
                log_octocrab_error("Failed to update issue labels", e);
                Err(mapped)
            }
        }
    }
}

/// Reduces an absolute API URL to the route octocrab should request.
///
/// Relative routes (starting with `/`) are returned unchanged.
fn api_route(url_or_route: &str) -> Result<String, Error> {
    if url_or_route.starts_with('/') {
        return Ok(url_or_route.to_string());
    }

    let parsed =
        url::Url::parse(url_or_route).map_err(|e| Error::InvalidUrl(format!("{url_or_route}: {e}")))?;
    let mut route = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        route.push('?');
        route.push_str(query);
    }
    Ok(route)
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The GitHub token. It is only exposed to hand it to octocrab.
/// * `base_uri` - Optional API base (GitHub Enterprise or a test server).
///
/// # Errors
///
/// Returns `Error::AuthError` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(uri) = base_uri {
        builder = builder
            .base_uri(uri)
            .map_err(|e| Error::AuthError(format!("Invalid API base URI '{}': {}", uri, e)))?;
    }

    builder
        .personal_token(token.expose_secret().to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client");
            Error::AuthError("Failed to build a token authenticated client.".to_string())
        })
}

/// Translates an octocrab error into the crate error, separating transport
/// failures from error statuses returned by GitHub.
fn map_octocrab_error(e: &octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            let message = source.message.clone();
            if status == 404 {
                Error::NotFound
            } else if (status == 403 || status == 429)
                && message.to_ascii_lowercase().contains("rate limit")
            {
                Error::RateLimitExceeded
            } else {
                Error::Remote { status, message }
            }
        }
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => Error::InvalidResponse,
        other => Error::Transport(other.to_string()),
    }
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                status = err.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
