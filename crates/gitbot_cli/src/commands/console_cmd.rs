//! `gitbot console`: polls repositories and labels their issues until
//! interrupted.
//!
//! # Examples
//!
//! ```bash
//! gitbot console -v -i 120 octocat/hello-world octocat/spoon-knife
//! gitbot console --no-comments --default-label triage octocat/hello-world
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use gitbot_core::{
    credentials::DEFAULT_AUTH_FILE, paths, rule_set::DEFAULT_RULES_FILE, AuthFileCredentials,
    ChainedCredentials, CredentialKind, CredentialProvider, GitHubTracker, IssueTracker,
    RepositoryRef, RuleSet, RuleSourceError, SyncOptions, SyncOrchestrator,
};
use github_client::{create_token_client, GitHubClient};
use tracing::{debug, instrument, warn};

use crate::config::{LabellingArgs, PollingArgs};
use crate::errors::Error;

#[cfg(test)]
#[path = "console_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct ConsoleArgs {
    /// Repositories to label, as owner/name
    #[arg(required = true)]
    pub repositories: Vec<String>,

    /// Authentication file. See auth.toml.sample
    #[arg(short, long, default_value = DEFAULT_AUTH_FILE)]
    pub auth: PathBuf,

    /// File containing labelling rules
    #[arg(short, long = "rules-file", default_value = DEFAULT_RULES_FILE)]
    pub rules_file: PathBuf,

    /// Interval of repository checking in seconds
    #[arg(short, long, default_value_t = 60)]
    pub interval: u64,

    #[command(flatten)]
    pub labelling: LabellingArgs,

    #[command(flatten)]
    pub polling: PollingArgs,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long = "api-url")]
    pub api_url: Option<String>,
}

impl ConsoleArgs {
    pub fn sync_options(&self) -> SyncOptions {
        self.polling.apply(self.labelling.sync_options())
    }
}

/// Execute the console command
#[instrument(skip(args))]
pub async fn execute(args: &ConsoleArgs) -> Result<(), Error> {
    let repositories = parse_repositories(&args.repositories)?;
    let config_dir = paths::config_dir();

    let credentials = ChainedCredentials::environment_then_file(AuthFileCredentials::locate(
        &args.auth,
        config_dir.as_deref(),
    ));
    let token = credentials.credential(CredentialKind::GitHubToken).await?;
    let client = create_token_client(&token, args.api_url.as_deref())?;

    let orchestrator = SyncOrchestrator::new(
        GitHubTracker::new(GitHubClient::new(client)),
        args.sync_options(),
    );

    poll(
        &orchestrator,
        args,
        &repositories,
        config_dir.as_deref(),
        gitbot_api::shutdown_signal(),
    )
    .await
}

/// Runs polling cycles until `shutdown` completes.
///
/// The rules file is re-read at the start of every cycle.
pub async fn poll<T, S>(
    orchestrator: &SyncOrchestrator<T>,
    args: &ConsoleArgs,
    repositories: &[RepositoryRef],
    config_dir: Option<&Path>,
    shutdown: S,
) -> Result<(), Error>
where
    T: IssueTracker,
    S: Future<Output = ()>,
{
    let load_rules = move || async move {
        log_configuration(args, repositories);
        let rules = RuleSet::load_with_fallback(&args.rules_file, config_dir).await?;
        for rule in &rules {
            debug!("{}", rule);
        }
        Ok::<RuleSet, RuleSourceError>(rules)
    };

    orchestrator
        .run_polling(
            repositories,
            load_rules,
            Duration::from_secs(args.interval),
            shutdown,
        )
        .await?;

    Ok(())
}

/// Parses `owner/name` arguments.
///
/// # Errors
///
/// `Error::InvalidRepository` for the first argument that is not `owner/name`.
pub fn parse_repositories(values: &[String]) -> Result<Vec<RepositoryRef>, Error> {
    values
        .iter()
        .map(|value| value.parse::<RepositoryRef>().map_err(Error::from))
        .collect()
}

fn log_configuration(args: &ConsoleArgs, repositories: &[RepositoryRef]) {
    let options = args.sync_options();
    let repositories: Vec<String> = repositories.iter().map(|r| r.to_string()).collect();

    warn!(
        repositories = ?repositories,
        auth = %args.auth.display(),
        rules_file = %args.rules_file.display(),
        interval = args.interval,
        default_label = options.resolution.default_label.as_deref().unwrap_or(""),
        skip_labelled = options.skip_labelled,
        process_comments = options.resolution.process_comments,
        process_closed = options.process_closed,
        process_title = options.resolution.process_title,
        remove_current = options.remove_current,
        dry_run = options.dry_run,
        always_update = options.always_update,
        "Starting labelling cycle"
    );
}
