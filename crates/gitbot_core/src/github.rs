//! GitHub implementation of the tracker collaborators.
//!
//! [`GitHubTracker`] adapts any [`IssueClient`] to [`TicketFetcher`],
//! [`CommentFetcher`] and [`LabelApplier`], validating raw issues into
//! [`Ticket`]s on the way in.

use async_trait::async_trait;
use github_client::{IssueClient, IssueState};
use tracing::{debug, instrument, warn};

use crate::errors::TrackerError;
use crate::repository::RepositoryRef;
use crate::ticket::Ticket;
use crate::tracker::{CommentFetcher, LabelApplier, TicketFetcher, TicketScope};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Issue tracker backed by the GitHub REST API.
#[derive(Debug)]
pub struct GitHubTracker<C> {
    client: C,
}

impl<C> GitHubTracker<C>
where
    C: IssueClient,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl From<TicketScope> for IssueState {
    fn from(scope: TicketScope) -> Self {
        match scope {
            TicketScope::Open => IssueState::Open,
            TicketScope::All => IssueState::All,
        }
    }
}

#[async_trait]
impl<C> TicketFetcher for GitHubTracker<C>
where
    C: IssueClient,
{
    #[instrument(skip(self), fields(repository = %repository, scope = %scope))]
    async fn fetch_tickets(
        &self,
        repository: &RepositoryRef,
        scope: TicketScope,
    ) -> Result<Vec<Ticket>, TrackerError> {
        let payloads = self
            .client
            .list_issues(repository.owner(), repository.name(), scope.into())
            .await?;

        let mut tickets = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let number = payload.number;
            match Ticket::from_payload(payload, repository.clone()) {
                Ok(ticket) => tickets.push(ticket),
                Err(e) => warn!(issue = ?number, error = %e, "Dropping unparseable issue"),
            }
        }

        debug!(count = tickets.len(), "Parsed tickets");
        Ok(tickets)
    }
}

#[async_trait]
impl<C> CommentFetcher for GitHubTracker<C>
where
    C: IssueClient,
{
    #[instrument(skip(self, ticket), fields(issue = %ticket))]
    async fn fetch_comments(&self, ticket: &Ticket) -> Result<Vec<String>, TrackerError> {
        let comments = self.client.list_issue_comments(ticket.comments_url()).await?;

        Ok(comments
            .into_iter()
            .map(|c| c.body.unwrap_or_default())
            .collect())
    }
}

#[async_trait]
impl<C> LabelApplier for GitHubTracker<C>
where
    C: IssueClient,
{
    #[instrument(skip(self, ticket), fields(issue = %ticket))]
    async fn apply_labels(&self, ticket: &Ticket, labels: &[String]) -> Result<(), TrackerError> {
        let repository = ticket.repository();
        self.client
            .replace_issue_labels(repository.owner(), repository.name(), ticket.number(), labels)
            .await?;
        Ok(())
    }
}
