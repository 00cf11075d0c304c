//! Loading of ordered rule sets from rule definition text.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::RuleSourceError;
use crate::rule::{Rule, RULE_SEPARATOR};

#[cfg(test)]
#[path = "rule_set_tests.rs"]
mod tests;

/// Lines starting with this marker are comments.
pub const COMMENT_MARKER: &str = "#;";

/// File name of the rules file in the user configuration directory.
pub const DEFAULT_RULES_FILE: &str = "rules.cfg";

/// An ordered, immutable collection of rules.
///
/// Rules are evaluated in the order they were defined. The set is built once
/// per processing cycle and passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    skipped: usize,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules, skipped: 0 }
    }

    /// Builds a rule set from rule definition lines.
    ///
    /// Comment lines and blank lines are ignored. Lines without a separator,
    /// with an empty label or with a pattern that does not compile are skipped
    /// with a warning naming the 1-based line number. A malformed line never
    /// fails the load.
    pub fn load<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        let mut skipped = 0;

        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let line = raw.as_ref();

            if line.starts_with(COMMENT_MARKER) {
                continue;
            }

            if line.trim().is_empty() {
                debug!(line = line_number, "Skipping blank rule line");
                continue;
            }

            if !line.contains(RULE_SEPARATOR) {
                warn!(
                    line = line_number,
                    content = line,
                    "Rule line has no '{}' separator, skipping",
                    RULE_SEPARATOR
                );
                skipped += 1;
                continue;
            }

            match Rule::parse_line(line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => skipped += 1,
                Err(e) => {
                    warn!(
                        line = line_number,
                        content = line,
                        error = %e,
                        "Invalid rule, skipping"
                    );
                    skipped += 1;
                }
            }
        }

        Self { rules, skipped }
    }

    /// Builds a rule set from a block of rule definition text.
    pub fn load_str(text: &str) -> Self {
        Self::load(text.lines())
    }

    /// Reads and loads a rules file.
    ///
    /// # Errors
    ///
    /// `RuleSourceError::NotFound` if the file does not exist and
    /// `RuleSourceError::Read` for any other I/O failure.
    pub async fn load_file(path: &Path) -> Result<Self, RuleSourceError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuleSourceError::NotFound {
                    searched: vec![path.to_path_buf()],
                }
            } else {
                RuleSourceError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let set = Self::load_str(&text);
        info!(
            path = %path.display(),
            rules = set.len(),
            skipped = set.skipped(),
            "Loaded rules"
        );
        Ok(set)
    }

    /// Loads `path`, falling back to `rules.cfg` in `fallback_dir` when `path`
    /// does not exist.
    ///
    /// # Errors
    ///
    /// `RuleSourceError::NotFound` listing every location that was tried.
    pub async fn load_with_fallback(
        path: &Path,
        fallback_dir: Option<&Path>,
    ) -> Result<Self, RuleSourceError> {
        if is_file(path).await {
            return Self::load_file(path).await;
        }

        let mut searched = vec![path.to_path_buf()];
        if let Some(dir) = fallback_dir {
            let fallback: PathBuf = dir.join(DEFAULT_RULES_FILE);
            if is_file(&fallback).await {
                warn!(
                    requested = %path.display(),
                    fallback = %fallback.display(),
                    "Rules file not found, using the one from the configuration directory"
                );
                return Self::load_file(&fallback).await;
            }
            searched.push(fallback);
        }

        Err(RuleSourceError::NotFound { searched })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of non-comment, non-blank lines that did not produce a rule.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
