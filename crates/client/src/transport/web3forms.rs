//! Web3Forms submission client.
//!
//! Web3Forms relays a JSON form post to the studio inbox. Identifiers are
//! replaced by display labels before sending since the payload is read by
//! people, not parsed.

use async_trait::async_trait;
use hydra_studios_core::ContactInquiry;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::{InquiryTransport, SubmissionResponse, TransportError, read_response};

/// Web3Forms submission endpoint.
pub const WEB3FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Subject line of the relayed email.
pub const SUBMISSION_SUBJECT: &str = "Ny bokningsförfrågan via Hydra Studios webbformulär";

/// JSON body posted to Web3Forms.
#[derive(Serialize)]
pub struct Web3FormsPayload<'a> {
    pub access_key: &'a str,
    pub subject: &'static str,
    pub from_name: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub project: &'static str,
    pub studio: &'static str,
    #[serde(rename = "dateRange")]
    pub date_range: &'a str,
    pub message: &'a str,
    /// Honeypot, always empty for real submissions.
    pub botcheck: &'static str,
}

impl<'a> Web3FormsPayload<'a> {
    #[must_use]
    pub fn new(access_key: &'a str, inquiry: &'a ContactInquiry) -> Self {
        Self {
            access_key,
            subject: SUBMISSION_SUBJECT,
            from_name: &inquiry.name,
            name: &inquiry.name,
            email: inquiry.email.as_str(),
            phone: &inquiry.phone,
            project: inquiry.project_label(),
            studio: inquiry.studio_label(),
            date_range: &inquiry.date_range,
            message: &inquiry.message,
            botcheck: "",
        }
    }
}

/// Client for the Web3Forms submission API.
///
/// Implements `Debug` manually to redact the access key.
#[derive(Clone)]
pub struct Web3FormsClient {
    client: reqwest::Client,
    endpoint: Url,
    access_key: SecretString,
}

impl std::fmt::Debug for Web3FormsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Web3FormsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("access_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Web3FormsClient {
    /// Create a client for the public Web3Forms endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(access_key: SecretString) -> Result<Self, TransportError> {
        Self::with_endpoint(access_key, WEB3FORMS_ENDPOINT)
    }

    /// Create a client for a custom endpoint (tests, proxies).
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not a URL or the HTTP client fails
    /// to build.
    pub fn with_endpoint(access_key: SecretString, endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            access_key,
        })
    }

    /// The endpoint submissions are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InquiryTransport for Web3FormsClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, project = %inquiry.project))]
    async fn send(&self, inquiry: &ContactInquiry) -> Result<SubmissionResponse, TransportError> {
        let payload = Web3FormsPayload::new(self.access_key.expose_secret(), inquiry);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;

        let decoded = read_response(response).await?;
        tracing::debug!(success = decoded.success, "Web3Forms responded");
        Ok(decoded)
    }
}
