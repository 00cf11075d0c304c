use std::{io, path::PathBuf};

use gitbot_core::{CredentialError, RepositoryRefError, RuleSourceError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the gitbot CLI application.
///
/// Every variant is fatal: the command stops and the process exits with a
/// non-zero status after logging the error.
#[derive(Error, Debug)]
pub enum Error {
    /// The rules file could not be found or read.
    #[error("Rules error: {0}")]
    Rules(#[from] RuleSourceError),

    /// The GitHub token or webhook secret could not be loaded.
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// A repository argument is not of the form `owner/name`.
    #[error("Invalid arguments: {0}")]
    InvalidRepository(#[from] RepositoryRefError),

    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    GitHub(#[from] github_client::Error),

    /// No per-user configuration directory could be determined.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to write a file to the filesystem.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The webhook server failed to start or stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}
