//! HTTP response models
//!
//! This module contains the HTTP-specific types returned by the endpoints.
//! Inbound webhook bodies are modelled in `github_client::webhook`.

pub mod response;

// Re-export commonly used types
pub use response::{CallbackCode, CallbackResponse, HealthCheckResponse};
