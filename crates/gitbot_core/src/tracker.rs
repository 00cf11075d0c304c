//! Issue tracker collaborators.
//!
//! The labelling engine never talks to GitHub directly. It asks these traits
//! for tickets and comments and hands them the labels to persist. The
//! production implementation lives in [`crate::github`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::TrackerError;
use crate::repository::RepositoryRef;
use crate::ticket::Ticket;

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;

/// Which tickets a pass covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketScope {
    /// Open tickets only.
    #[default]
    Open,
    /// Open and closed tickets.
    All,
}

impl TicketScope {
    pub fn from_process_closed(process_closed: bool) -> Self {
        if process_closed {
            TicketScope::All
        } else {
            TicketScope::Open
        }
    }
}

impl std::fmt::Display for TicketScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketScope::Open => f.write_str("open"),
            TicketScope::All => f.write_str("all"),
        }
    }
}

/// Lists the tickets of a repository.
#[async_trait]
pub trait TicketFetcher: Send + Sync {
    /// Returns every ticket in `scope`, in the order the tracker lists them.
    ///
    /// Raw issues that cannot be validated into a [`Ticket`] are left out.
    async fn fetch_tickets(
        &self,
        repository: &RepositoryRef,
        scope: TicketScope,
    ) -> Result<Vec<Ticket>, TrackerError>;
}

/// Lists the comment bodies of a ticket.
#[async_trait]
pub trait CommentFetcher: Send + Sync {
    async fn fetch_comments(&self, ticket: &Ticket) -> Result<Vec<String>, TrackerError>;
}

/// Replaces the labels of a ticket.
#[async_trait]
pub trait LabelApplier: Send + Sync {
    /// Sets the labels of `ticket` to exactly `labels`. Never called with an
    /// empty slice.
    async fn apply_labels(&self, ticket: &Ticket, labels: &[String]) -> Result<(), TrackerError>;
}

/// A tracker able to do everything a sync pass needs.
pub trait IssueTracker: TicketFetcher + CommentFetcher + LabelApplier {}

impl<T> IssueTracker for T where T: TicketFetcher + CommentFetcher + LabelApplier {}

#[async_trait]
impl<T> TicketFetcher for Arc<T>
where
    T: TicketFetcher + ?Sized,
{
    async fn fetch_tickets(
        &self,
        repository: &RepositoryRef,
        scope: TicketScope,
    ) -> Result<Vec<Ticket>, TrackerError> {
        (**self).fetch_tickets(repository, scope).await
    }
}

#[async_trait]
impl<T> CommentFetcher for Arc<T>
where
    T: CommentFetcher + ?Sized,
{
    async fn fetch_comments(&self, ticket: &Ticket) -> Result<Vec<String>, TrackerError> {
        (**self).fetch_comments(ticket).await
    }
}

#[async_trait]
impl<T> LabelApplier for Arc<T>
where
    T: LabelApplier + ?Sized,
{
    async fn apply_labels(&self, ticket: &Ticket, labels: &[String]) -> Result<(), TrackerError> {
        (**self).apply_labels(ticket, labels).await
    }
}
