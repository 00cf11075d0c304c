//! Gitbot webhook API
//!
//! This crate provides the reactive mode of gitbot: an HTTP server that
//! receives GitHub `issues` webhook deliveries and labels the issue in each
//! delivery as soon as it is opened or edited.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - Webhook signature verification
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//!
//! Labelling itself is done by `gitbot_core`. The dependency flows:
//! HTTP API → Business Logic, never the reverse.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use gitbot_core::{
    paths, AuthFileCredentials, ChainedCredentials, CredentialKind, CredentialProvider,
    GitHubTracker, IssueTracker, RuleSet, SyncOptions, SyncOrchestrator,
};
use github_client::{create_token_client, GitHubClient};
use secrecy::SecretString;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

// Re-export key types for convenience
pub use errors::ApiError;
pub use server::{shutdown_signal, ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Default API host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Tracker type used by the server.
pub type SharedTracker = Arc<dyn IssueTracker>;

/// Application state shared across handlers
///
/// The rule set is loaded once at start-up and shared read-only by all
/// requests.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<SyncOrchestrator<SharedTracker>>,
    rules: Arc<RuleSet>,
    hook_secret: Arc<SecretString>,
}

impl AppState {
    /// Create new application state
    ///
    /// # Arguments
    ///
    /// * `orchestrator` - Runs the labelling engine for a delivered issue
    /// * `rules` - Rules used for every delivery
    /// * `hook_secret` - Secret the webhook deliveries are signed with
    pub fn new(
        orchestrator: SyncOrchestrator<SharedTracker>,
        rules: RuleSet,
        hook_secret: SecretString,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            rules: Arc::new(rules),
            hook_secret: Arc::new(hook_secret),
        }
    }

    pub fn orchestrator(&self) -> &SyncOrchestrator<SharedTracker> {
        &self.orchestrator
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn hook_secret(&self) -> &SecretString {
        &self.hook_secret
    }
}

/// Settings needed to build the server state.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Rules file. Falls back to `rules.cfg` in the user configuration directory.
    pub rules_file: PathBuf,

    /// Auth file. Falls back to `auth.toml` in the user configuration directory.
    pub auth_file: PathBuf,

    /// GitHub API base URL, for GitHub Enterprise
    pub api_url: Option<String>,

    pub options: SyncOptions,
}

/// Loads rules and credentials and connects to GitHub.
///
/// # Errors
///
/// Fails when the rules file, the GitHub token or the webhook secret cannot
/// be found, or when the GitHub client cannot be built.
pub async fn build_state(settings: &WebSettings) -> anyhow::Result<AppState> {
    let config_dir = paths::config_dir();

    let rules = RuleSet::load_with_fallback(&settings.rules_file, config_dir.as_deref())
        .await
        .context("Failed to load rules")?;

    let credentials = ChainedCredentials::environment_then_file(AuthFileCredentials::locate(
        &settings.auth_file,
        config_dir.as_deref(),
    ));
    let token = credentials
        .credential(CredentialKind::GitHubToken)
        .await
        .context("Failed to load the GitHub token")?;
    let hook_secret = credentials
        .credential(CredentialKind::HookSecret)
        .await
        .context("Failed to load the webhook secret")?;

    let client = create_token_client(&token, settings.api_url.as_deref())
        .context("Failed to create the GitHub client")?;
    let tracker: SharedTracker = Arc::new(GitHubTracker::new(GitHubClient::new(client)));

    tracing::info!(rules = rules.len(), "Loaded webhook configuration");

    Ok(AppState::new(
        SyncOrchestrator::new(tracker, settings.options.clone()),
        rules,
        hook_secret,
    ))
}
