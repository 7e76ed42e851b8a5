//! Request validation
//!
//! Provides a `ValidatedJson` extractor that deserializes a JSON body and
//! runs its `validator` rules before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            Self::JsonError(e) => (e.status(), e.body_text()),
            Self::ValidationFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: "validation_error".to_string(),
            details: Some(details),
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten field errors into `field: message` pairs
pub(crate) fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// A JSON extractor that also validates the request body
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct ClickRequest {
///     #[validate(range(min = -90.0, max = 90.0))]
///     latitude: f64,
/// }
///
/// async fn handler(ValidatedJson(req): ValidatedJson<ClickRequest>) {
///     // req is validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;

        Ok(Self(value))
    }
}
