//! Repository domain types
//!
//! A [`RepositoryRef`] identifies the repository a ticket belongs to.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RepositoryRefError;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Validated `owner/name` repository reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Create a new repository reference with validation
    ///
    /// # Validation Rules
    /// - Owner and name must both be non-empty
    /// - Neither part may contain `/` or whitespace
    ///
    /// # Errors
    /// Returns `RepositoryRefError` if validation fails
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepositoryRefError> {
        let owner = owner.into();
        let name = name.into();

        let valid_part =
            |s: &str| !s.is_empty() && !s.contains('/') && !s.chars().any(char::is_whitespace);

        if !valid_part(&owner) || !valid_part(&name) {
            return Err(RepositoryRefError(format!("{}/{}", owner, name)));
        }

        Ok(Self { owner, name })
    }

    /// Get the owner (user or organization) of the repository
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name without the owner
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = RepositoryRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| RepositoryRefError(s.to_string()))?;

        Self::new(owner, name).map_err(|_| RepositoryRefError(s.to_string()))
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
