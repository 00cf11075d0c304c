//! Tests for error handling and HTTP conversion

use super::*;
use axum::http::StatusCode;
use gitbot_core::TicketParseError;
use http_body_util::BodyExt;

async fn body_of(error: ApiError) -> (StatusCode, CallbackResponse) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_signature_error_conversion() {
    assert!(matches!(
        ApiError::from(SignatureError::Missing),
        ApiError::MissingSignature
    ));
    assert!(matches!(
        ApiError::from(SignatureError::Mismatch),
        ApiError::WrongSignature(SignatureError::Mismatch)
    ));
    assert!(matches!(
        ApiError::from(SignatureError::Malformed("x".to_string())),
        ApiError::WrongSignature(_)
    ));
}

#[tokio::test]
async fn test_missing_signature_response() {
    let (status, body) = body_of(ApiError::MissingSignature).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, 2);
}

#[tokio::test]
async fn test_wrong_signature_response() {
    let (status, body) = body_of(ApiError::WrongSignature(SignatureError::Mismatch)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, 1);
    assert!(body.message.contains("does not match"));
}

#[tokio::test]
async fn test_malformed_payload_response() {
    let error = ApiError::from(WebhookRejection::InvalidIssue(TicketParseError::MissingField(
        "number",
    )));
    let (status, body) = body_of(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, 4);
    assert!(body.message.contains("number"));
}

#[tokio::test]
async fn test_update_failed_response() {
    let error = ApiError::UpdateFailed {
        issue_number: 12,
        source: TrackerError::Remote {
            status: 500,
            message: "boom".to_string(),
        },
    };
    let (status, body) = body_of(error).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body.code, 6);
    assert_eq!(body.issue_number, Some(12));
}
