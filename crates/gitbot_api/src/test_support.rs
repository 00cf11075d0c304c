//! Shared helpers for the handler, route and server tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gitbot_core::{
    signature::{sign, SignatureAlgorithm},
    CommentFetcher, LabelApplier, RepositoryRef, RuleSet, SyncOptions, SyncOrchestrator, Ticket,
    TicketFetcher, TicketScope, TrackerError,
};
use secrecy::SecretString;
use serde_json::json;

use crate::{AppState, SharedTracker};

pub const HOOK_SECRET: &str = "test-hook-secret";

/// Tracker recording label updates; comments come from `comments`.
#[derive(Default)]
pub struct RecordingTracker {
    pub comments: Vec<String>,
    pub fail_apply: bool,
    pub applied: Mutex<Vec<(u64, Vec<String>)>>,
}

#[async_trait]
impl TicketFetcher for RecordingTracker {
    async fn fetch_tickets(
        &self,
        _repository: &RepositoryRef,
        _scope: TicketScope,
    ) -> Result<Vec<Ticket>, TrackerError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl CommentFetcher for RecordingTracker {
    async fn fetch_comments(&self, _ticket: &Ticket) -> Result<Vec<String>, TrackerError> {
        Ok(self.comments.clone())
    }
}

#[async_trait]
impl LabelApplier for RecordingTracker {
    async fn apply_labels(&self, ticket: &Ticket, labels: &[String]) -> Result<(), TrackerError> {
        self.applied
            .lock()
            .unwrap()
            .push((ticket.number(), labels.to_vec()));
        if self.fail_apply {
            return Err(TrackerError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}

pub fn sample_rules() -> RuleSet {
    RuleSet::load_str("bug\\s+[^?]*=>bug\nhelp=>help wanted\n(how|what|why).*\\?=>question\n")
}

pub fn state_with(tracker: Arc<RecordingTracker>, options: SyncOptions) -> AppState {
    let shared: SharedTracker = tracker;
    AppState::new(
        SyncOrchestrator::new(shared, options),
        sample_rules(),
        SecretString::from(HOOK_SECRET.to_string()),
    )
}

pub fn test_state() -> AppState {
    state_with(Arc::new(RecordingTracker::default()), SyncOptions::default())
}

pub fn issue_delivery(action: &str, title: &str, labels: &[&str]) -> Vec<u8> {
    let labels: Vec<_> = labels.iter().map(|l| json!({ "name": l })).collect();
    serde_json::to_vec(&json!({
        "action": action,
        "issue": {
            "url": "https://api.github.com/repos/octo/issues/issues/17",
            "comments_url": "https://api.github.com/repos/octo/issues/issues/17/comments",
            "number": 17,
            "title": title,
            "body": "",
            "state": "open",
            "labels": labels
        },
        "repository": { "full_name": "octo/issues" }
    }))
    .unwrap()
}

pub fn sign_body(body: &[u8]) -> String {
    sign(body, HOOK_SECRET.as_bytes(), SignatureAlgorithm::Sha256)
}
