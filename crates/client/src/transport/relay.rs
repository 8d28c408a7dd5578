//! Client for the site's own mail relay route.
//!
//! The relay validates again on the server and maps identifiers itself, so
//! the raw form values (identifiers, not labels) are posted.

use async_trait::async_trait;
use hydra_studios_core::ContactInquiry;
use tracing::instrument;
use url::Url;

use super::{InquiryTransport, SubmissionResponse, TransportError, read_response};

/// Path of the mail relay route on the site.
pub const RELAY_PATH: &str = "/api/send-email";

/// HTTP client for `POST /api/send-email`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RelayClient {
    /// Create a client for the relay hosted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if `base_url` is not a URL or the HTTP client fails to
    /// build.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(base_url)?.join(RELAY_PATH)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint submissions are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InquiryTransport for RelayClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, project = %inquiry.project))]
    async fn send(&self, inquiry: &ContactInquiry) -> Result<SubmissionResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&inquiry.to_form_input())
            .send()
            .await?;

        let decoded = read_response(response).await?;
        tracing::debug!(success = decoded.success, "Mail relay responded");
        Ok(decoded)
    }
}
