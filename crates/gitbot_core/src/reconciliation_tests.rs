use super::*;

use tracing_test::traced_test;

use crate::test_support::ticket;

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_reconcile_keeps_current_labels() {
    let result = reconcile(&labels(&["bug", "help"]), &labels(&["ui", "bug"]), false);
    assert_eq!(result, labels(&["bug", "help", "ui"]));
}

#[test]
fn test_reconcile_removes_current_labels() {
    let result = reconcile(&labels(&["bug", "help"]), &labels(&["ui"]), true);
    assert_eq!(result, labels(&["bug", "help"]));
}

#[test]
fn test_reconcile_deduplicates_new_labels() {
    let result = reconcile(&labels(&["bug", "bug", "help", "bug"]), &[], false);
    assert_eq!(result, labels(&["bug", "help"]));
}

#[test]
fn test_plan_update_no_new_labels() {
    let t = ticket(1, "title", "body", &["ui"]);

    assert_eq!(plan_update(&t, &[], false, false), ReconciliationOutcome::NoChange);
    assert_eq!(plan_update(&t, &[], true, true), ReconciliationOutcome::NoChange);
}

#[test]
fn test_plan_update_merges_with_current() {
    let t = ticket(1, "title", "body", &["ui"]);

    assert_eq!(
        plan_update(&t, &labels(&["bug"]), false, false),
        ReconciliationOutcome::Update(labels(&["bug", "ui"]))
    );
}

#[test]
fn test_plan_update_unchanged_is_skipped_by_default() {
    let t = ticket(1, "title", "body", &["ui", "bug"]);

    assert_eq!(
        plan_update(&t, &labels(&["bug"]), false, false),
        ReconciliationOutcome::Unchanged
    );
}

#[test]
fn test_plan_update_always_update_forces_write() {
    let t = ticket(1, "title", "body", &["ui", "bug"]);

    assert_eq!(
        plan_update(&t, &labels(&["bug"]), false, true),
        ReconciliationOutcome::Update(labels(&["bug", "ui", ]))
    );
}

#[traced_test]
#[test]
fn test_plan_update_remove_current_logs_dropped_labels() {
    let t = ticket(1, "title", "body", &["ui", "bug"]);

    assert_eq!(
        plan_update(&t, &labels(&["bug"]), true, false),
        ReconciliationOutcome::Update(labels(&["bug"]))
    );
    assert!(logs_contain("Removing existing labels"));
    assert!(logs_contain("ui"));
}
