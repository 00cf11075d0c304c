//! Shared test doubles for the engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{IssuePayload, Label};

use crate::errors::TrackerError;
use crate::repository::RepositoryRef;
use crate::ticket::Ticket;
use crate::tracker::{CommentFetcher, LabelApplier, TicketFetcher, TicketScope};

pub fn repo() -> RepositoryRef {
    RepositoryRef::new("melkamar", "mi-pyt-test-issues").unwrap()
}

pub fn ticket(number: u64, title: &str, body: &str, labels: &[&str]) -> Ticket {
    ticket_with_state(number, title, body, labels, "open")
}

pub fn ticket_with_state(
    number: u64,
    title: &str,
    body: &str,
    labels: &[&str],
    state: &str,
) -> Ticket {
    let payload = IssuePayload {
        url: Some(format!(
            "https://api.github.com/repos/melkamar/mi-pyt-test-issues/issues/{number}"
        )),
        comments_url: Some(format!(
            "https://api.github.com/repos/melkamar/mi-pyt-test-issues/issues/{number}/comments"
        )),
        number: Some(number),
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        state: Some(state.to_string()),
        labels: Some(
            labels
                .iter()
                .map(|l| Label {
                    name: l.to_string(),
                })
                .collect(),
        ),
    };
    Ticket::from_payload(payload, repo()).unwrap()
}

/// In-memory tracker recording every call made to it.
#[derive(Default)]
pub struct MockTracker {
    pub tickets: Vec<Ticket>,
    pub comments: HashMap<u64, Vec<String>>,
    pub fail_fetch: bool,
    pub fail_comments: bool,
    pub fail_apply_for: HashSet<u64>,
    pub fetch_calls: Mutex<Vec<TicketScope>>,
    pub comment_calls: AtomicUsize,
    pub applied: Mutex<Vec<(u64, Vec<String>)>>,
}

impl MockTracker {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            ..Default::default()
        }
    }

    pub fn with_comments(mut self, number: u64, comments: &[&str]) -> Self {
        self.comments
            .insert(number, comments.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn comment_call_count(&self) -> usize {
        self.comment_calls.load(Ordering::SeqCst)
    }

    pub fn applied(&self) -> Vec<(u64, Vec<String>)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketFetcher for MockTracker {
    async fn fetch_tickets(
        &self,
        _repository: &RepositoryRef,
        scope: TicketScope,
    ) -> Result<Vec<Ticket>, TrackerError> {
        self.fetch_calls.lock().unwrap().push(scope);
        if self.fail_fetch {
            return Err(TrackerError::Transport("connection refused".to_string()));
        }
        Ok(self
            .tickets
            .iter()
            .filter(|t| scope == TicketScope::All || t.is_open())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentFetcher for MockTracker {
    async fn fetch_comments(&self, ticket: &Ticket) -> Result<Vec<String>, TrackerError> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_comments {
            return Err(TrackerError::Remote {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        Ok(self
            .comments
            .get(&ticket.number())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl LabelApplier for MockTracker {
    async fn apply_labels(&self, ticket: &Ticket, labels: &[String]) -> Result<(), TrackerError> {
        assert!(!labels.is_empty(), "apply_labels called with no labels");
        self.applied
            .lock()
            .unwrap()
            .push((ticket.number(), labels.to_vec()));
        if self.fail_apply_for.contains(&ticket.number()) {
            return Err(TrackerError::Remote {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        Ok(())
    }
}
