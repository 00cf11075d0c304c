//! Credential resolution.
//!
//! The bot needs two secrets: the GitHub token used for API calls and the
//! webhook secret used to authenticate inbound events. They come from
//! environment variables or from the `[auth]` table of an auth file:
//!
//! ```toml
//! [auth]
//! github_token = "ghp_..."
//! hook_secret = "..."
//! ```
//!
//! Values are handed out as [`SecretString`] and never logged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

/// File name of the auth file in the user configuration directory.
pub const DEFAULT_AUTH_FILE: &str = "auth.toml";

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const HOOK_SECRET_ENV: &str = "GITBOT_HOOK_SECRET";

/// The secrets the bot knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    GitHubToken,
    HookSecret,
}

impl CredentialKind {
    /// Key of the credential in the `[auth]` table.
    pub fn auth_key(&self) -> &'static str {
        match self {
            CredentialKind::GitHubToken => "github_token",
            CredentialKind::HookSecret => "hook_secret",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.auth_key())
    }
}

/// Error type for credential resolution failures.
///
/// Messages name the credential and where it was looked for, never its value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Credential '{kind}' not found. Searched: {searched}")]
    NotFound {
        kind: CredentialKind,
        searched: String,
    },

    #[error("Invalid auth file {path:?}: {reason}")]
    InvalidFile { path: PathBuf, reason: String },

    #[error("Failed to read auth file {path:?}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Source of credentials.
///
/// # Security
/// - Implementations MUST NOT log credential values
/// - Empty values are treated as absent
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credential(&self, kind: CredentialKind) -> Result<SecretString, CredentialError>;
}

/// Reads credentials from environment variables.
///
/// Defaults to `GITHUB_TOKEN` and `GITBOT_HOOK_SECRET`.
#[derive(Debug, Clone)]
pub struct EnvironmentCredentials {
    token_var: String,
    hook_secret_var: String,
}

impl EnvironmentCredentials {
    pub fn new() -> Self {
        Self::with_variables(GITHUB_TOKEN_ENV, HOOK_SECRET_ENV)
    }

    pub fn with_variables(token_var: impl Into<String>, hook_secret_var: impl Into<String>) -> Self {
        Self {
            token_var: token_var.into(),
            hook_secret_var: hook_secret_var.into(),
        }
    }

    fn variable(&self, kind: CredentialKind) -> &str {
        match kind {
            CredentialKind::GitHubToken => &self.token_var,
            CredentialKind::HookSecret => &self.hook_secret_var,
        }
    }
}

impl Default for EnvironmentCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentials {
    async fn credential(&self, kind: CredentialKind) -> Result<SecretString, CredentialError> {
        let var = self.variable(kind);
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => {
                debug!(credential = %kind, variable = var, "Using credential from environment");
                Ok(SecretString::from(value.trim().to_string()))
            }
            _ => Err(CredentialError::NotFound {
                kind,
                searched: format!("environment variable {}", var),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthFile {
    #[serde(default)]
    auth: AuthSection,
}

#[derive(Debug, Default, Deserialize)]
struct AuthSection {
    github_token: Option<String>,
    hook_secret: Option<String>,
}

/// Reads credentials from the `[auth]` table of a TOML file.
///
/// The file is read on every request so a changed token is picked up without
/// a restart.
#[derive(Debug, Clone)]
pub struct AuthFileCredentials {
    path: PathBuf,
}

impl AuthFileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `path` when it exists, otherwise `auth.toml` in `fallback_dir`
    /// when that exists. Falls back to `path` so errors name the requested
    /// file.
    pub fn locate(path: &Path, fallback_dir: Option<&Path>) -> Self {
        if path.is_file() {
            return Self::new(path);
        }

        if let Some(dir) = fallback_dir {
            let fallback = dir.join(DEFAULT_AUTH_FILE);
            if fallback.is_file() {
                warn!(
                    requested = %path.display(),
                    fallback = %fallback.display(),
                    "Auth file not found, using the one from the configuration directory"
                );
                return Self::new(fallback);
            }
        }

        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialProvider for AuthFileCredentials {
    async fn credential(&self, kind: CredentialKind) -> Result<SecretString, CredentialError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound {
                    kind,
                    searched: format!("auth file {}", self.path.display()),
                });
            }
            Err(e) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    message: e.to_string(),
                });
            }
        };

        let file: AuthFile = toml::from_str(&text).map_err(|e| CredentialError::InvalidFile {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let value = match kind {
            CredentialKind::GitHubToken => file.auth.github_token,
            CredentialKind::HookSecret => file.auth.hook_secret,
        };

        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) => {
                debug!(credential = %kind, path = %self.path.display(), "Using credential from auth file");
                Ok(SecretString::from(v))
            }
            None => Err(CredentialError::NotFound {
                kind,
                searched: format!("[auth].{} in {}", kind.auth_key(), self.path.display()),
            }),
        }
    }
}

/// Tries providers in order and returns the first credential found.
///
/// Errors other than `NotFound` stop the search, so a broken auth file is
/// reported instead of silently skipped.
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Environment variables first, then the auth file.
    pub fn environment_then_file(auth_file: AuthFileCredentials) -> Self {
        Self::new(vec![
            Box::new(EnvironmentCredentials::new()),
            Box::new(auth_file),
        ])
    }
}

#[async_trait]
impl CredentialProvider for ChainedCredentials {
    async fn credential(&self, kind: CredentialKind) -> Result<SecretString, CredentialError> {
        let mut searched = Vec::new();

        for provider in &self.providers {
            match provider.credential(kind).await {
                Ok(secret) => return Ok(secret),
                Err(CredentialError::NotFound { searched: s, .. }) => searched.push(s),
                Err(e) => return Err(e),
            }
        }

        Err(CredentialError::NotFound {
            kind,
            searched: searched.join(", "),
        })
    }
}
