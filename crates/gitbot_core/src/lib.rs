//! # Gitbot Core
//!
//! This crate provides the labelling engine of gitbot, a bot that labels GitHub
//! issues by matching their text against an ordered list of regular-expression
//! rules.
//!
//! ## Overview
//!
//! One processing pass over a repository works as follows:
//! 1. Rules are loaded from a rules file ([`RuleSet`])
//! 2. Tickets are fetched from the tracker ([`TicketFetcher`])
//! 3. Tickets that already carry labels are optionally skipped
//! 4. Each rule is matched against the body, then the title, then the comments
//!    ([`resolve_labels`]). Comments are fetched at most once per ticket and
//!    only when needed.
//! 5. The new labels are merged with the current ones ([`reconcile`])
//! 6. The final label list is written back ([`LabelApplier`])
//!
//! ## Main Types
//!
//! - [`SyncOrchestrator`] - Runs passes (polling mode) or single tickets
//!   (reactive mode)
//! - [`SyncOptions`] - Policy flags for a pass
//! - [`GitHubTracker`] - GitHub implementation of the tracker traits
//!
//! ## Examples
//!
//! ```no_run
//! use gitbot_core::{GitHubTracker, RepositoryRef, RuleSet, SyncOptions, SyncOrchestrator};
//! use github_client::{create_token_client, GitHubClient};
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from("ghp_example".to_string());
//! let client = GitHubClient::new(create_token_client(&token, None)?);
//! let orchestrator = SyncOrchestrator::new(GitHubTracker::new(client), SyncOptions::default());
//!
//! let rules = RuleSet::load_str("bug\\s+[^?]*=>bug\nhelp=>help wanted");
//! let repository: RepositoryRef = "octo/issues".parse()?;
//!
//! let report = orchestrator.run_pass(&repository, &rules).await;
//! println!("Updated {} issues", report.updated);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The engine only depends on the traits in [`tracker`], so it can be driven
//! by test doubles. Inbound webhook deliveries are authenticated with
//! [`signature`] and validated with [`webhook`] before reaching the engine.
//!
//! ## Error Handling
//!
//! Malformed data (a bad rule line, an incomplete issue) is skipped and logged.
//! Tracker failures are logged and the affected ticket or repository is skipped
//! for the pass. A missing rules file or credential is returned to the caller
//! as an error.

pub mod credentials;
pub mod errors;
pub mod github;
pub mod orchestrator;
pub mod paths;
pub mod reconciliation;
pub mod repository;
pub mod resolution;
pub mod rule;
pub mod rule_set;
pub mod signature;
pub mod ticket;
pub mod tracker;
pub mod webhook;

#[cfg(test)]
mod test_support;

pub use credentials::{
    AuthFileCredentials, ChainedCredentials, CredentialError, CredentialKind, CredentialProvider,
    EnvironmentCredentials,
};
pub use errors::{
    RepositoryRefError, RuleError, RuleSourceError, TicketParseError, TrackerError,
};
pub use github::GitHubTracker;
pub use orchestrator::{PassReport, SyncOptions, SyncOrchestrator, TicketOutcome};
pub use reconciliation::{plan_update, reconcile, ReconciliationOutcome};
pub use repository::RepositoryRef;
pub use resolution::{resolve_labels, ResolutionOptions};
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use signature::SignatureError;
pub use ticket::Ticket;
pub use tracker::{CommentFetcher, IssueTracker, LabelApplier, TicketFetcher, TicketScope};
pub use webhook::{EventDisposition, WebhookRejection};
