//! Gitbot webhook server
//!
//! Main binary for running the webhook server on its own, for example in a
//! container. The `gitbot web` command of the CLI starts the same server.
//!
//! # Environment Variables
//!
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RUST_LOG`: Log level (default: info)
//! - `GITBOT_RULES`: Rules file (default: rules.cfg)
//! - `GITBOT_AUTH`: Auth file (default: auth.toml)
//! - `GITHUB_API_URL`: GitHub API base URL, for GitHub Enterprise

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use gitbot_api::{build_state, ApiConfig, ApiServer, WebSettings, DEFAULT_HOST, DEFAULT_PORT};
use gitbot_core::{credentials::DEFAULT_AUTH_FILE, rule_set::DEFAULT_RULES_FILE, SyncOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    // Load configuration from environment
    let config = ApiConfig {
        port: match env::var("API_PORT") {
            Ok(port) => port.parse().context("Invalid API_PORT")?,
            Err(_) => DEFAULT_PORT,
        },
        host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
    };

    let settings = WebSettings {
        rules_file: env::var("GITBOT_RULES")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_RULES_FILE)),
        auth_file: env::var("GITBOT_AUTH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AUTH_FILE)),
        api_url: env::var("GITHUB_API_URL").ok(),
        options: SyncOptions::default(),
    };

    let state = build_state(&settings).await?;

    tracing::info!("Starting gitbot webhook server");
    tracing::info!("Rules file: {}", settings.rules_file.display());

    ApiServer::new(config, state).serve().await
}
