//! Label resolution.
//!
//! Evaluates an ordered [`RuleSet`] against the text of one [`Ticket`] and
//! produces the labels the rules ask for. For each rule the body is checked
//! first, then the title, then the comments. Comments are fetched lazily, at
//! most once per ticket, and only when some rule reaches the comment step.

use tracing::{debug, warn};

use crate::rule::Rule;
use crate::rule_set::RuleSet;
use crate::ticket::Ticket;
use crate::tracker::CommentFetcher;

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;

/// Which parts of a ticket are searched, and the fallback label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    pub process_title: bool,
    pub process_comments: bool,
    /// Applied when no rule matched. Ignored when empty.
    pub default_label: Option<String>,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            process_title: true,
            process_comments: true,
            default_label: None,
        }
    }
}

impl ResolutionOptions {
    fn default_label(&self) -> Option<&str> {
        self.default_label.as_deref().filter(|l| !l.is_empty())
    }
}

/// Where a rule found its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchSource {
    Body,
    Title,
    Comment,
}

/// Comment bodies of a ticket, fetched on first use.
struct LazyComments<'a, F: ?Sized> {
    fetcher: &'a F,
    ticket: &'a Ticket,
    comments: Option<Vec<String>>,
}

impl<'a, F> LazyComments<'a, F>
where
    F: CommentFetcher + ?Sized,
{
    fn new(fetcher: &'a F, ticket: &'a Ticket) -> Self {
        Self {
            fetcher,
            ticket,
            comments: None,
        }
    }

    async fn get(&mut self) -> &[String] {
        if self.comments.is_none() {
            let fetched = match self.fetcher.fetch_comments(self.ticket).await {
                Ok(comments) => {
                    debug!(issue = %self.ticket, count = comments.len(), "Fetched comments");
                    comments
                }
                Err(e) => {
                    warn!(
                        issue = %self.ticket,
                        error = %e,
                        "Failed to fetch comments, continuing without them"
                    );
                    Vec::new()
                }
            };
            self.comments = Some(fetched);
        }

        self.comments.as_deref().unwrap_or_default()
    }
}

/// Computes the labels `rules` assign to `ticket`.
///
/// Each matching rule contributes its label once, in rule order. Duplicates
/// across rules are kept here and removed during reconciliation. When no rule
/// matched and a non-empty default label is configured, the result is just
/// the default label.
pub async fn resolve_labels<F>(
    ticket: &Ticket,
    rules: &RuleSet,
    options: &ResolutionOptions,
    comments: &F,
) -> Vec<String>
where
    F: CommentFetcher + ?Sized,
{
    let mut comments = LazyComments::new(comments, ticket);
    let mut new_labels = Vec::new();

    for rule in rules {
        if let Some(source) = find_match(rule, ticket, options, &mut comments).await {
            debug!(
                issue = %ticket,
                rule = %rule.pattern(),
                label = rule.label(),
                source = ?source,
                "Rule matched"
            );
            new_labels.push(rule.label().to_string());
        }
    }

    if new_labels.is_empty() {
        if let Some(default_label) = options.default_label() {
            debug!(issue = %ticket, label = default_label, "No rule matched, using default label");
            new_labels.push(default_label.to_string());
        }
    }

    new_labels
}

async fn find_match<F>(
    rule: &Rule,
    ticket: &Ticket,
    options: &ResolutionOptions,
    comments: &mut LazyComments<'_, F>,
) -> Option<MatchSource>
where
    F: CommentFetcher + ?Sized,
{
    if rule.matches(ticket.body()) {
        return Some(MatchSource::Body);
    }

    if options.process_title && rule.matches(ticket.title()) {
        return Some(MatchSource::Title);
    }

    if options.process_comments && comments.get().await.iter().any(|c| rule.matches(c)) {
        return Some(MatchSource::Comment);
    }

    None
}
