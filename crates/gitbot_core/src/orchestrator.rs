//! Sync orchestration.
//!
//! A [`SyncOrchestrator`] drives the labelling engine over tickets supplied by
//! an [`IssueTracker`]. It supports the two operating modes of the bot:
//!
//! - **Polling**: [`SyncOrchestrator::run_polling`] repeats
//!   [`SyncOrchestrator::run_pass`] over every configured repository, then
//!   waits for the interval or for shutdown.
//! - **Reactive**: [`SyncOrchestrator::process_ticket`] handles the single
//!   ticket carried by an inbound webhook event.
//!
//! Tickets are processed one after another and independently. A failure on
//! one ticket or repository is logged and the rest of the work continues.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::errors::{RuleSourceError, TrackerError};
use crate::reconciliation::{plan_update, ReconciliationOutcome};
use crate::repository::RepositoryRef;
use crate::resolution::{resolve_labels, ResolutionOptions};
use crate::rule_set::RuleSet;
use crate::ticket::Ticket;
use crate::tracker::{IssueTracker, TicketScope};

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

/// Policy for a sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub resolution: ResolutionOptions,

    /// Include closed tickets in polling passes.
    pub process_closed: bool,

    /// Leave tickets that already carry labels untouched in polling passes.
    pub skip_labelled: bool,

    /// Replace the current labels instead of adding to them.
    pub remove_current: bool,

    /// Compute and log, but never write labels.
    pub dry_run: bool,

    /// Write the labels even when they equal the current ones.
    pub always_update: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            resolution: ResolutionOptions::default(),
            process_closed: false,
            skip_labelled: true,
            remove_current: false,
            dry_run: false,
            always_update: false,
        }
    }
}

/// What happened to one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Skipped because it already has labels.
    Skipped,

    /// No rule matched and no default label is configured.
    Unmatched,

    /// The resolved labels are already applied.
    Unchanged,

    /// The labels were written.
    Updated(Vec<String>),

    /// The labels would have been written, but this is a dry run.
    DryRun(Vec<String>),

    /// Writing the labels failed.
    Failed(TrackerError),
}

impl TicketOutcome {
    /// The labels the ticket ends up with, or would end up with on a dry run.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            TicketOutcome::Updated(labels) | TicketOutcome::DryRun(labels) => Some(labels),
            _ => None,
        }
    }
}

/// Tally of one pass over a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub fetched: usize,
    pub skipped: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl PassReport {
    fn record(&mut self, outcome: &TicketOutcome) {
        match outcome {
            TicketOutcome::Skipped => self.skipped += 1,
            TicketOutcome::Unmatched => self.unmatched += 1,
            TicketOutcome::Unchanged => self.unchanged += 1,
            TicketOutcome::Updated(_) | TicketOutcome::DryRun(_) => self.updated += 1,
            TicketOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Runs the labelling engine against an issue tracker.
#[derive(Debug)]
pub struct SyncOrchestrator<T> {
    tracker: T,
    options: SyncOptions,
}

impl<T> SyncOrchestrator<T>
where
    T: IssueTracker,
{
    pub fn new(tracker: T, options: SyncOptions) -> Self {
        Self { tracker, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Processes every ticket of `repository` once.
    ///
    /// When the tickets cannot be fetched the failure is logged and the pass
    /// reports zero tickets.
    #[instrument(skip(self, rules), fields(repository = %repository))]
    pub async fn run_pass(&self, repository: &RepositoryRef, rules: &RuleSet) -> PassReport {
        let mut report = PassReport::default();
        let scope = TicketScope::from_process_closed(self.options.process_closed);

        let tickets = match self.tracker.fetch_tickets(repository, scope).await {
            Ok(tickets) => tickets,
            Err(e) => {
                error!(error = %e, "Failed to fetch issues, skipping repository this cycle");
                return report;
            }
        };
        report.fetched = tickets.len();
        info!(count = tickets.len(), scope = %scope, "Processing issues");

        for ticket in &tickets {
            let outcome = if self.options.skip_labelled && ticket.has_labels() {
                info!(issue = %ticket, labels = ?ticket.current_labels(), "Skipping labelled issue");
                TicketOutcome::Skipped
            } else {
                self.process_ticket(ticket, rules).await
            };
            report.record(&outcome);
        }

        info!(
            fetched = report.fetched,
            skipped = report.skipped,
            updated = report.updated,
            unchanged = report.unchanged,
            unmatched = report.unmatched,
            failed = report.failed,
            "Pass complete"
        );
        report
    }

    /// Resolves, reconciles and applies the labels of a single ticket.
    ///
    /// The skip-labelled policy is not applied here; callers decide whether a
    /// ticket should be processed at all.
    #[instrument(skip(self, ticket, rules), fields(issue = %ticket))]
    pub async fn process_ticket(&self, ticket: &Ticket, rules: &RuleSet) -> TicketOutcome {
        let new_labels =
            resolve_labels(ticket, rules, &self.options.resolution, &self.tracker).await;

        let final_labels = match plan_update(
            ticket,
            &new_labels,
            self.options.remove_current,
            self.options.always_update,
        ) {
            ReconciliationOutcome::NoChange => {
                debug!("No labels to add");
                return TicketOutcome::Unmatched;
            }
            ReconciliationOutcome::Unchanged => {
                debug!(labels = ?ticket.current_labels(), "Labels already applied");
                return TicketOutcome::Unchanged;
            }
            ReconciliationOutcome::Update(labels) => labels,
        };

        if self.options.dry_run {
            info!(labels = ?final_labels, "Dry run, not applying labels");
            return TicketOutcome::DryRun(final_labels);
        }

        match self.tracker.apply_labels(ticket, &final_labels).await {
            Ok(()) => {
                info!(labels = ?final_labels, "Applied labels");
                TicketOutcome::Updated(final_labels)
            }
            Err(e) => {
                error!(error = %e, labels = ?final_labels, "Failed to apply labels");
                TicketOutcome::Failed(e)
            }
        }
    }

    /// Runs passes over `repositories` every `interval` until `shutdown`
    /// completes.
    ///
    /// `load_rules` is called at the start of every cycle so edits to the rules
    /// file take effect without a restart. The wait between cycles ends early
    /// when `shutdown` completes; a cycle in progress is finished first.
    ///
    /// # Errors
    ///
    /// Returns the `RuleSourceError` if the rules cannot be loaded. This stops
    /// the loop.
    pub async fn run_polling<L, F, S>(
        &self,
        repositories: &[RepositoryRef],
        mut load_rules: L,
        interval: Duration,
        shutdown: S,
    ) -> Result<(), RuleSourceError>
    where
        L: FnMut() -> F,
        F: Future<Output = Result<RuleSet, RuleSourceError>>,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycle: u64 = 0;

        loop {
            cycle += 1;
            let rules = load_rules().await?;
            info!(cycle = cycle, rules = rules.len(), "Starting polling cycle");

            for repository in repositories {
                self.run_pass(repository, &rules).await;
            }

            info!(seconds = interval.as_secs(), "Waiting for next cycle");
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = &mut shutdown => {
                    warn!("Shutdown requested, stopping polling");
                    return Ok(());
                }
            }
        }
    }
}
