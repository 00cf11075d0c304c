//! Tests for server state construction

use super::*;
use std::fs;
use tempfile::TempDir;

fn settings(dir: &TempDir) -> WebSettings {
    WebSettings {
        rules_file: dir.path().join("rules.cfg"),
        auth_file: dir.path().join("auth.toml"),
        api_url: Some("http://127.0.0.1:1".to_string()),
        options: SyncOptions::default(),
    }
}

#[tokio::test]
async fn test_build_state_from_files() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(dir.path().join("rules.cfg"), "help=>help wanted\nbroken line\n").unwrap();
    fs::write(
        dir.path().join("auth.toml"),
        "[auth]\ngithub_token = \"token\"\nhook_secret = \"secret\"\n",
    )
    .unwrap();

    let state = build_state(&settings(&dir)).await.expect("state should build");

    assert_eq!(state.rules().len(), 1);
    assert_eq!(state.rules().skipped(), 1);
    assert_eq!(state.orchestrator().options(), &SyncOptions::default());
}

#[tokio::test]
async fn test_build_state_requires_hook_secret() {
    if std::env::var(gitbot_core::credentials::HOOK_SECRET_ENV).is_ok() {
        return;
    }

    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(dir.path().join("rules.cfg"), "help=>help wanted\n").unwrap();
    fs::write(dir.path().join("auth.toml"), "[auth]\ngithub_token = \"token\"\n").unwrap();

    let error = build_state(&settings(&dir)).await.err().expect("should fail");

    assert!(error.to_string().contains("webhook secret"));
}
