//! Contact form mail relay.
//!
//! Validates a booking inquiry on the server, renders the booking request
//! email and hands it to the configured mailer.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use hydra_studios_core::ContactFormInput;
use serde::Deserialize;
use tracing::{Span, instrument};

use crate::error::{ApiResponse, AppError, Result, add_breadcrumb};
use crate::services::compose_booking_request;
use crate::state::AppState;

/// Message returned when the booking request was handed to the mailer.
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// Body of `POST /api/send-email`.
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(flatten)]
    pub form: ContactFormInput,
    /// Honeypot; humans never see it, so it must stay empty.
    #[serde(default)]
    pub botcheck: Option<serde_json::Value>,
}

impl SendEmailRequest {
    /// Whether the honeypot field was filled in.
    #[must_use]
    pub fn is_spam(&self) -> bool {
        match &self.botcheck {
            None | Some(serde_json::Value::Null | serde_json::Value::Bool(false)) => false,
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}

/// Relay a booking inquiry to the studio inbox.
///
/// POST /api/send-email
#[instrument(skip_all, fields(project = tracing::field::Empty))]
pub async fn send_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected contact request body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    if request.is_spam() {
        tracing::warn!("Honeypot filled, dropping submission");
        return Ok(Json(ApiResponse::ok(SENT_MESSAGE)));
    }

    let inquiry = request.form.validate().map_err(|errors| {
        tracing::info!(fields = %errors, "Contact form failed validation");
        AppError::Validation(errors)
    })?;

    Span::current().record("project", inquiry.project.id());
    add_breadcrumb(
        "contact",
        "Booking request validated",
        &[("project", inquiry.project.id())],
    );

    let email = compose_booking_request(&inquiry, &state.config().contact_recipient, Utc::now())?;
    state.mailer().send(&email).await?;

    tracing::info!(
        project = inquiry.project.id(),
        studio = inquiry.studio_label(),
        "Booking request relayed"
    );
    Ok(Json(ApiResponse::ok(SENT_MESSAGE)))
}
