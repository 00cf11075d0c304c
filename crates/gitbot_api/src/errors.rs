//! Error handling and HTTP error conversion
//!
//! This module defines how failures while handling a webhook delivery are
//! translated to HTTP responses. Every error becomes a [`CallbackResponse`]
//! with the matching [`CallbackCode`].
//!
//! # Architecture
//!
//! Domain errors from `gitbot_core` are converted to HTTP responses with
//! appropriate status codes. This conversion happens at the HTTP boundary
//! only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gitbot_core::{SignatureError, TrackerError, WebhookRejection};
use thiserror::Error;

use crate::models::{CallbackCode, CallbackResponse};

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Reasons a webhook delivery is refused or fails.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(body: Bytes) -> Result<Json<CallbackResponse>, ApiError> {
///     let disposition = parse_issue_event(&body)?; // Converts rejection to ApiError
///     Ok(Json(...))
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Signature header is missing")]
    MissingSignature,

    #[error("Wrong signature: {0}")]
    WrongSignature(SignatureError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] WebhookRejection),

    #[error("Failed to update labels of issue #{issue_number}: {source}")]
    UpdateFailed {
        issue_number: u64,
        #[source]
        source: TrackerError,
    },
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Missing => ApiError::MissingSignature,
            other => ApiError::WrongSignature(other),
        }
    }
}

impl ApiError {
    /// HTTP status and callback code for this error.
    pub fn status_and_code(&self) -> (StatusCode, CallbackCode) {
        match self {
            ApiError::MissingSignature => (StatusCode::BAD_REQUEST, CallbackCode::MissingSignature),
            ApiError::WrongSignature(_) => (StatusCode::BAD_REQUEST, CallbackCode::WrongSignature),
            ApiError::MalformedPayload(_) => {
                (StatusCode::BAD_REQUEST, CallbackCode::MalformedPayload)
            }
            ApiError::UpdateFailed { .. } => (StatusCode::BAD_GATEWAY, CallbackCode::UpdateFailed),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Log error server-side
        log_error(&self, status);

        let mut body = CallbackResponse::new(code, self.to_string());
        if let ApiError::UpdateFailed { issue_number, .. } = &self {
            body.issue_number = Some(*issue_number);
        }

        (status, Json(body)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!("API error: {} - {}", status, error);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, error);
        }
    }
}
