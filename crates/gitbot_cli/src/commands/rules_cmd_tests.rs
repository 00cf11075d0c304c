use super::*;
use std::fs;
use tempfile::TempDir;

fn plain() {
    colored::control::set_override(false);
}

#[test]
fn test_format_rules_lists_each_rule() {
    plain();
    let rules = RuleSet::load_str("bug\\s+[^?]*=>bug\nhelp=>help wanted\n");

    let output = format_rules(Path::new("rules.cfg"), &rules);

    assert!(output.contains("RULE: bug\\s+[^?]*   --->   bug\n"));
    assert!(output.contains("RULE: help   --->   help wanted\n"));
    assert!(output.ends_with("2 rules loaded\n"));
}

#[test]
fn test_format_rules_reports_skipped_lines() {
    plain();
    let rules = RuleSet::load_str("#; comment\nno separator here\nhelp=>help wanted\n([=>broken\n");

    let output = format_rules(Path::new("rules.cfg"), &rules);

    assert!(output.ends_with("1 rules loaded, 2 lines skipped\n"));
}

#[tokio::test]
async fn test_execute_with_rules_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("rules.cfg");
    fs::write(&path, "help=>help wanted\n").expect("Failed to write rules");

    assert!(execute(&path).await.is_ok());
}

#[tokio::test]
async fn test_execute_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp directory");

    let result = execute(&dir.path().join("missing.cfg")).await;

    assert!(matches!(result, Err(Error::Rules(_))));
}
