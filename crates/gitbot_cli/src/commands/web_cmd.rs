//! `gitbot web`: labels issues as GitHub reports them through the webhook
//! at `/callback`.
//!
//! The GitHub webhook secret must be set up both at GitHub and in the auth
//! file (or `GITBOT_HOOK_SECRET`) for deliveries to be accepted.

use std::path::PathBuf;

use clap::Args;
use gitbot_api::{build_state, ApiConfig, ApiServer, WebSettings, DEFAULT_HOST, DEFAULT_PORT};
use gitbot_core::{credentials::DEFAULT_AUTH_FILE, rule_set::DEFAULT_RULES_FILE};
use tracing::{info, instrument};

use crate::config::LabellingArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "web_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct WebArgs {
    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Authentication file. See auth.toml.sample
    #[arg(short, long, default_value = DEFAULT_AUTH_FILE)]
    pub auth: PathBuf,

    /// File containing labelling rules
    #[arg(short, long = "rules-file", default_value = DEFAULT_RULES_FILE)]
    pub rules_file: PathBuf,

    #[command(flatten)]
    pub labelling: LabellingArgs,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long = "api-url")]
    pub api_url: Option<String>,
}

impl WebArgs {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            port: self.port,
            host: self.host.clone(),
        }
    }

    pub fn settings(&self) -> WebSettings {
        WebSettings {
            rules_file: self.rules_file.clone(),
            auth_file: self.auth.clone(),
            api_url: self.api_url.clone(),
            options: self.labelling.sync_options(),
        }
    }
}

/// Execute the web command
#[instrument(skip(args))]
pub async fn execute(args: &WebArgs) -> Result<(), Error> {
    let state = build_state(&args.settings())
        .await
        .map_err(|e| Error::Server(format!("{:#}", e)))?;

    info!(host = %args.host, port = args.port, "Starting webhook listener");

    ApiServer::new(args.api_config(), state)
        .serve()
        .await
        .map_err(|e| Error::Server(format!("{:#}", e)))
}
