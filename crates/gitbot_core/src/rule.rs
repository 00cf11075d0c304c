//! Labelling rules.
//!
//! A [`Rule`] pairs a case-insensitive regular expression with the label that
//! is applied when the expression is found in a piece of ticket text. Rules
//! are written one per line as `pattern=>label`.

use regex::{Regex, RegexBuilder};

use crate::errors::RuleError;

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;

/// Separator between the pattern and the label in a rule definition.
pub const RULE_SEPARATOR: &str = "=>";

/// A compiled labelling rule.
///
/// # Examples
///
/// ```
/// use gitbot_core::Rule;
///
/// let rule = Rule::compile("[Hh]ello", "welcoming").unwrap();
/// assert!(rule.matches("hello dev!"));
/// assert!(rule.matches("Hello, how are you?"));
/// assert!(!rule.matches("Hell no."));
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    label: String,
}

impl Rule {
    /// Compiles a rule from its pattern and label text.
    ///
    /// The label is trimmed. The pattern is used as written, whitespace included.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::EmptyLabel` if the trimmed label is empty and
    /// `RuleError::InvalidPattern` if the pattern does not compile.
    pub fn compile(pattern: &str, label: &str) -> Result<Self, RuleError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(RuleError::EmptyLabel);
        }

        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern,
            label: label.to_string(),
        })
    }

    /// Parses a `pattern=>label` line.
    ///
    /// The line is split on the first `=>`. Returns `Ok(None)` when the line has
    /// no separator. Line terminators are stripped before splitting.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitbot_core::Rule;
    ///
    /// let rule = Rule::parse_line("some\\s+regexp=>new label").unwrap().unwrap();
    /// assert_eq!(rule.pattern(), "some\\s+regexp");
    /// assert_eq!(rule.label(), "new label");
    ///
    /// assert!(Rule::parse_line("abc=abc").unwrap().is_none());
    /// ```
    pub fn parse_line(line: &str) -> Result<Option<Self>, RuleError> {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.split_once(RULE_SEPARATOR) {
            Some((pattern, label)) => Self::compile(pattern, label).map(Some),
            None => Ok(None),
        }
    }

    /// Returns `true` if the pattern occurs anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The pattern source as written in the rule definition.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RULE: {}   --->   {}", self.pattern(), self.label)
    }
}
