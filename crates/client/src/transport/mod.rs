//! Transports that deliver a validated inquiry.
//!
//! # Transports
//!
//! - [`Web3FormsClient`] - posts directly to the Web3Forms submission API
//! - [`RelayClient`] - posts to the site's `/api/send-email` mail relay
//!
//! Both endpoints answer with the same JSON envelope,
//! `{ "success": bool, "message"?: string, "errors"?: { field: message } }`,
//! which is decoded into [`SubmissionResponse`].

mod relay;
mod web3forms;

use std::collections::BTreeMap;

use async_trait::async_trait;
use hydra_studios_core::ContactInquiry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use relay::{RELAY_PATH, RelayClient};
pub use web3forms::{SUBMISSION_SUBJECT, WEB3FORMS_ENDPOINT, Web3FormsClient, Web3FormsPayload};

/// Longest error body kept in [`TransportError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur while delivering an inquiry.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with something other than the JSON envelope.
    #[error("Unexpected response from submission endpoint (HTTP {status})")]
    Status { status: u16, body: String },

    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl TransportError {
    /// Message suitable for showing next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Decoded answer from a submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field-keyed messages from a remote validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Something that can deliver a validated inquiry.
#[async_trait]
pub trait InquiryTransport: Send + Sync {
    /// Send the inquiry once and decode the endpoint's answer.
    ///
    /// A remote rejection is an `Ok` response with `success == false`;
    /// `Err` means no usable answer was received.
    async fn send(&self, inquiry: &ContactInquiry) -> Result<SubmissionResponse, TransportError>;
}

#[async_trait]
impl<T: InquiryTransport + ?Sized> InquiryTransport for Box<T> {
    async fn send(&self, inquiry: &ContactInquiry) -> Result<SubmissionResponse, TransportError> {
        (**self).send(inquiry).await
    }
}

/// Decode the JSON envelope from any status code.
///
/// A body that claims success on an error status is treated as a failure.
async fn read_response(response: reqwest::Response) -> Result<SubmissionResponse, TransportError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<SubmissionResponse>(&body) {
        Ok(mut parsed) => {
            parsed.success &= status.is_success();
            Ok(parsed)
        }
        Err(e) => {
            tracing::warn!(status = %status, error = %e, "Submission endpoint returned non-JSON body");
            Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            })
        }
    }
}
