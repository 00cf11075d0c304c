//! Tests for routes module

use super::*;
use crate::test_support::test_state;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use tower::ServiceExt;

#[test]
fn test_router_creation() {
    let _router = create_router(test_state());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = create_router(test_state())
        .oneshot(
            Request::builder()
                .uri("/issues")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_callback_only_accepts_post() {
    let response = create_router(test_state())
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = create_router(test_state())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(crate::middleware::REQUEST_ID_HEADER));
}
