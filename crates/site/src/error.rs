//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Errors are rendered as
//! the same JSON envelope the success path uses, so the contact form only has
//! one response shape to interpret.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hydra_studios_core::FieldErrors;
use serde::Serialize;
use thiserror::Error;

use crate::services::MailError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submitted inquiry failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Email could not be rendered or delivered.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,
}

/// JSON body of every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiResponse {
    /// Successful response with a message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    /// Failed response with a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Mail(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let body = match self {
            Self::Validation(errors) => ApiResponse {
                success: false,
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            Self::Mail(_) => ApiResponse::failure("Failed to send email"),
            Self::BadRequest(message) => ApiResponse::failure(message),
            Self::RateLimited => {
                ApiResponse::failure("Too many requests. Please try again later.")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a user action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail leading up to
/// an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
