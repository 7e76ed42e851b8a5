//! API error handling
//!
//! Maps application failures to HTTP statuses and a uniform JSON body
//! `{ error, code, details? }` that the page shows in its notification bar.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Upstream service failed: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::BadGateway(msg)
            | Self::ServiceUnavailable(msg) => msg,
            Self::RateLimited => "Rate limit exceeded, try again shortly".to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        // A failing route segment is classified by what the routing port reported
        match err.root_cause() {
            ApplicationError::Domain(_) => Self::BadRequest(err.to_string()),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::StaleRoute => Self::Conflict(err.to_string()),
            ApplicationError::Configuration(_) => Self::ServiceUnavailable(err.to_string()),
            ApplicationError::ExternalService(_)
            | ApplicationError::InvalidResponse(_)
            | ApplicationError::RouteSegment { .. } => Self::BadGateway(err.to_string()),
        }
    }
}
