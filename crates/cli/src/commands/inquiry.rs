//! Send a booking inquiry from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Through the site's mail relay (RELAY_URL, default http://127.0.0.1:3000)
//! hs-cli inquiry --via relay -n "Anna Svensson" -e anna@example.com \
//!     -p mixing -m "Two days in March" --studio costa --accept-privacy
//!
//! # Directly to Web3Forms
//! hs-cli inquiry --via web3forms -n "Anna Svensson" -e anna@example.com \
//!     -p recording -m "Drum tracking" --dates "March 15-20" --accept-privacy
//! ```
//!
//! # Environment Variables
//!
//! - `WEB3FORMS_ACCESS_KEY` - Web3Forms access key (required for `--via web3forms`)
//! - `WEB3FORMS_ENDPOINT` - Override the Web3Forms endpoint (optional)
//! - `RELAY_URL` - Base URL of the site hosting the mail relay

use clap::{Args, ValueEnum};
use hydra_studios_client::{
    ContactForm, InquiryTransport, RelayClient, SubmitError, TransportError, Web3FormsClient,
};
use hydra_studios_core::ContactFormInput;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";

/// Where the inquiry is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Via {
    /// Web3Forms form relay service
    Web3forms,
    /// The site's own `/api/send-email` route
    Relay,
}

/// Form values for a booking inquiry.
#[derive(Debug, Args)]
pub struct InquiryArgs {
    /// Submission target
    #[arg(long, value_enum, default_value_t = Via::Relay)]
    pub via: Via,

    /// Your name
    #[arg(short, long)]
    pub name: String,

    /// Your email address
    #[arg(short, long)]
    pub email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Project type (see `hs-cli catalog`)
    #[arg(short, long)]
    pub project: String,

    /// Message to the studio
    #[arg(short, long)]
    pub message: String,

    /// Preferred studio (see `hs-cli catalog`)
    #[arg(long, default_value = "")]
    pub studio: String,

    /// Preferred dates, free text
    #[arg(long = "dates", default_value = "")]
    pub date_range: String,

    /// Accept the privacy policy
    #[arg(long)]
    pub accept_privacy: bool,
}

impl InquiryArgs {
    /// The form as the visitor would have filled it in.
    #[must_use]
    pub fn to_form_input(&self) -> ContactFormInput {
        ContactFormInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            project: self.project.clone(),
            message: self.message.clone(),
            studio: self.studio.clone(),
            date_range: self.date_range.clone(),
            privacy: self.accept_privacy,
        }
    }
}

/// Errors that can occur while sending an inquiry.
#[derive(Debug, Error)]
pub enum InquiryError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The transport could not be created.
    #[error("Invalid transport configuration: {0}")]
    Transport(#[from] TransportError),

    /// The inquiry was not delivered.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Validate and send an inquiry through the chosen transport.
///
/// # Errors
///
/// Returns error if the transport cannot be configured or the submission
/// fails for any reason (invalid fields, rejection, network error).
pub async fn send(args: &InquiryArgs) -> Result<(), InquiryError> {
    dotenvy::dotenv().ok();

    let values = args.to_form_input();

    match args.via {
        Via::Web3forms => {
            let access_key = std::env::var("WEB3FORMS_ACCESS_KEY")
                .map(SecretString::from)
                .map_err(|_| InquiryError::MissingEnvVar("WEB3FORMS_ACCESS_KEY"))?;
            let client = match std::env::var("WEB3FORMS_ENDPOINT") {
                Ok(endpoint) => Web3FormsClient::with_endpoint(access_key, &endpoint)?,
                Err(_) => Web3FormsClient::new(access_key)?,
            };
            tracing::info!(endpoint = %client.endpoint(), "Sending inquiry via Web3Forms");
            submit(ContactForm::with_values(client, values)).await
        }
        Via::Relay => {
            let base_url =
                std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
            let client = RelayClient::new(&base_url)?;
            tracing::info!(endpoint = %client.endpoint(), "Sending inquiry via mail relay");
            submit(ContactForm::with_values(client, values)).await
        }
    }
}

/// Submit the form and report the outcome the way the form would show it.
async fn submit<T: InquiryTransport>(form: ContactForm<T>) -> Result<(), InquiryError> {
    let result = form.submit().await;
    let state = form.state().await;

    for (field, error) in state.errors.iter() {
        tracing::error!(field = %field, "{error}");
    }

    if let Some(message) = state.status.message() {
        if result.is_ok() {
            tracing::info!("{message}");
        } else {
            tracing::error!("{message}");
        }
    }

    result.map_err(InquiryError::from)
}
