//! Unit tests for the github_client crate.

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> GitHubClient {
    let token = SecretString::from("ghp_test_token_value".to_string());
    let octocrab = create_token_client(&token, Some(&mock_server.uri()))
        .expect("Failed to create client");
    GitHubClient::new(octocrab)
}

fn issue_json(server: &MockServer, number: u64, title: &str) -> serde_json::Value {
    json!({
        "url": format!("{}/repos/octo/repo/issues/{}", server.uri(), number),
        "comments_url": format!("{}/repos/octo/repo/issues/{}/comments", server.uri(), number),
        "number": number,
        "title": title,
        "body": "Body text",
        "state": "open",
        "labels": []
    })
}

#[tokio::test]
async fn test_list_issues_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/issues"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            issue_json(&mock_server, 1, "First"),
            issue_json(&mock_server, 2, "Second"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let issues = client
        .list_issues("octo", "repo", IssueState::Open)
        .await
        .expect("list_issues failed");

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, Some(1));
    assert_eq!(issues[1].title.as_deref(), Some("Second"));
}

#[tokio::test]
async fn test_list_issues_follows_pages() {
    let mock_server = MockServer::start().await;

    let full_page: Vec<serde_json::Value> = (1..=PAGE_SIZE as u64)
        .map(|n| issue_json(&mock_server, n, "Issue"))
        .collect();

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/issues"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(full_page)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/issues"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue_json(&mock_server, 101, "Last")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let issues = client
        .list_issues("octo", "repo", IssueState::All)
        .await
        .expect("list_issues failed");

    assert_eq!(issues.len(), PAGE_SIZE + 1);
    assert_eq!(issues.last().and_then(|i| i.number), Some(101));
}

#[tokio::test]
async fn test_list_issues_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.list_issues("octo", "repo", IssueState::Open).await;

    match result {
        Err(Error::Remote { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Server Error");
        }
        other => panic!("Expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_issues_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/missing/issues"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.list_issues("octo", "missing", IssueState::Open).await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_list_issue_comments_uses_path_of_absolute_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/repo/issues/3/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "body": "comment test"},
            {"id": 11, "body": "something else"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let comments_url = format!("{}/repos/octo/repo/issues/3/comments", mock_server.uri());
    let comments = client
        .list_issue_comments(&comments_url)
        .await
        .expect("list_issue_comments failed");

    let bodies: Vec<_> = comments.iter().filter_map(|c| c.body.as_deref()).collect();
    assert_eq!(bodies, vec!["comment test", "something else"]);
}

#[tokio::test]
async fn test_list_issue_comments_rejects_garbage_url() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let result = client.list_issue_comments("not a url").await;

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn test_replace_issue_labels_sends_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/repo/issues/5"))
        .and(body_json(json!({"labels": ["bug", "question"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 5,
            "labels": [{"name": "bug"}, {"name": "question"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let labels = vec!["bug".to_string(), "question".to_string()];
    let result = client.replace_issue_labels("octo", "repo", 5, &labels).await;

    if let Err(e) = &result {
        eprintln!("replace_issue_labels error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_replace_issue_labels_validation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/repo/issues/5"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let labels = vec!["bug".to_string()];
    let result = client.replace_issue_labels("octo", "repo", 5, &labels).await;

    assert_eq!(result.unwrap_err().status(), Some(422));
}

#[test]
fn test_api_route_keeps_relative_routes() {
    assert_eq!(
        api_route("/repos/octo/repo/issues/1/comments").unwrap(),
        "/repos/octo/repo/issues/1/comments"
    );
}

#[test]
fn test_api_route_strips_host() {
    assert_eq!(
        api_route("https://api.github.com/repos/octo/repo/issues/1/comments").unwrap(),
        "/repos/octo/repo/issues/1/comments"
    );
}
