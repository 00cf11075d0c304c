//! HTTP request handlers
//!
//! - `POST /callback` receives GitHub `issues` webhook deliveries and labels
//!   the issue they carry.
//! - `GET /` serves the README, which explains how to register the webhook.
//! - `GET /health` reports liveness.

use std::sync::OnceLock;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Html,
    Json,
};
use gitbot_core::{signature, webhook, EventDisposition, TicketOutcome};
use github_client::webhook::{WebhookEvent, EVENT_HEADER, SIGNATURE_256_HEADER, SIGNATURE_HEADER};
use pulldown_cmark::{html, Options, Parser};
use secrecy::ExposeSecret;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::models::{CallbackCode, CallbackResponse, HealthCheckResponse};
use crate::AppState;

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// Handle a webhook delivery.
///
/// The signature is checked before anything else. Deliveries for other
/// events, or for issue actions other than `opened` and `edited`, are
/// acknowledged without processing.
#[instrument(
    skip(state, headers, body),
    fields(event = tracing::field::Empty, issue = tracing::field::Empty)
)]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallbackResponse>, ApiError> {
    signature::verify_delivery(
        &body,
        header_str(&headers, SIGNATURE_256_HEADER),
        header_str(&headers, SIGNATURE_HEADER),
        state.hook_secret().expose_secret().as_bytes(),
    )?;

    if let Some(event) = header_str(&headers, EVENT_HEADER).map(WebhookEvent::from_header) {
        tracing::Span::current().record("event", event.as_str());
        if event != WebhookEvent::Issues {
            info!(event = %event, "Ignoring event");
            return Ok(Json(CallbackResponse::new(
                CallbackCode::NotProcessed,
                format!("Not processing event. Will only process: issues. Received: {}.", event),
            )));
        }
    }

    let (action, ticket) = match webhook::parse_issue_event(&body)? {
        EventDisposition::Ignore { action } => {
            info!(action = %action, "Ignoring issue action");
            return Ok(Json(CallbackResponse::new(
                CallbackCode::NotProcessed,
                format!(
                    "Not processing issue. Will only process actions: {}. Received: {}.",
                    webhook::ACCEPTED_ACTIONS.join(", "),
                    action
                ),
            )));
        }
        EventDisposition::Process { action, ticket } => (action, ticket),
    };

    tracing::Span::current().record("issue", tracing::field::display(&ticket));
    info!(action = %action, url = ticket.url(), "Processing issue");

    let outcome = state
        .orchestrator()
        .process_ticket(&ticket, state.rules())
        .await;

    let (kind, labels) = match outcome {
        TicketOutcome::Failed(source) => {
            return Err(ApiError::UpdateFailed {
                issue_number: ticket.number(),
                source,
            });
        }
        TicketOutcome::Updated(labels) => ("updated", labels),
        TicketOutcome::DryRun(labels) => ("dry_run", labels),
        TicketOutcome::Unchanged => ("unchanged", ticket.current_labels().to_vec()),
        TicketOutcome::Unmatched | TicketOutcome::Skipped => {
            ("unmatched", ticket.current_labels().to_vec())
        }
    };

    Ok(Json(CallbackResponse {
        issue_number: Some(ticket.number()),
        labels: Some(labels),
        outcome: Some(kind.to_string()),
        ..CallbackResponse::new(CallbackCode::Done, "Callback done")
    }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// About page: the README rendered to HTML.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE.get_or_init(|| render_index(README)).as_str())
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

const README: &str = include_str!("../../../README.md");

static INDEX_PAGE: OnceLock<String> = OnceLock::new();

/// Renders the README below the page heading.
fn render_index(markdown: &str) -> String {
    let mut body = String::new();
    html::push_html(&mut body, Parser::new_ext(markdown, Options::ENABLE_TABLES));

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>gitbot</title>\n</head>\n<body>\n\
         <h1>GitHub issues bot index page</h1>\n{body}</body>\n</html>\n"
    )
}
