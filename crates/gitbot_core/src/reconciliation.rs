//! Merging of newly resolved labels with the labels a ticket already has.

use tracing::warn;

use crate::ticket::Ticket;

#[cfg(test)]
#[path = "reconciliation_tests.rs"]
mod tests;

/// What should happen to a ticket's labels after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// No rule and no default label produced anything. Nothing is written.
    NoChange,

    /// The final label set equals the current one.
    Unchanged,

    /// The ticket must be updated to carry exactly these labels.
    Update(Vec<String>),
}

/// Combines `new_labels` with `current_labels`.
///
/// With `remove_current` the result is the new labels only, otherwise the new
/// labels followed by the current ones. Either way duplicates are removed,
/// keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use gitbot_core::reconcile;
///
/// let new = vec!["bug".to_string(), "bug".to_string()];
/// let current = vec!["ui".to_string(), "bug".to_string()];
///
/// assert_eq!(reconcile(&new, &current, false), vec!["bug", "ui"]);
/// assert_eq!(reconcile(&new, &current, true), vec!["bug"]);
/// ```
pub fn reconcile(new_labels: &[String], current_labels: &[String], remove_current: bool) -> Vec<String> {
    let current: &[String] = if remove_current { &[] } else { current_labels };

    let mut result: Vec<String> = Vec::with_capacity(new_labels.len() + current.len());
    for label in new_labels.iter().chain(current) {
        if !result.contains(label) {
            result.push(label.clone());
        }
    }
    result
}

/// Decides how `ticket` is updated given the labels resolved for it.
///
/// Returns [`ReconciliationOutcome::NoChange`] when `new_labels` is empty.
/// When the final set equals the ticket's current labels (ignoring order) the
/// outcome is [`ReconciliationOutcome::Unchanged`], unless `always_update`
/// is set.
pub fn plan_update(
    ticket: &Ticket,
    new_labels: &[String],
    remove_current: bool,
    always_update: bool,
) -> ReconciliationOutcome {
    if new_labels.is_empty() {
        return ReconciliationOutcome::NoChange;
    }

    let final_labels = reconcile(new_labels, ticket.current_labels(), remove_current);

    if remove_current {
        let dropped: Vec<&String> = ticket
            .current_labels()
            .iter()
            .filter(|l| !final_labels.contains(l))
            .collect();
        if !dropped.is_empty() {
            warn!(issue = %ticket, dropped = ?dropped, "Removing existing labels");
        }
    }

    if !always_update && same_labels(&final_labels, ticket.current_labels()) {
        return ReconciliationOutcome::Unchanged;
    }

    ReconciliationOutcome::Update(final_labels)
}

fn same_labels(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|l| b.contains(l))
}
