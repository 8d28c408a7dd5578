//! Hydra Studios contact form client.
//!
//! Drives the booking inquiry form from first keystroke to delivery:
//!
//! - [`controller`] - Form state, validation gate, and submission lifecycle
//! - [`transport`] - Where a validated inquiry is sent: directly to the
//!   Web3Forms relay service, or to the site's own mail relay route
//!
//! ```rust,ignore
//! use hydra_studios_client::{ContactForm, Web3FormsClient};
//! use hydra_studios_core::ContactField;
//!
//! let form = ContactForm::new(Web3FormsClient::new(access_key)?);
//! form.set_field(ContactField::Name, "Anna Svensson").await;
//! // ...
//! form.submit().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod controller;
pub mod transport;

pub use controller::{
    CORRECT_FIELDS_MESSAGE, ContactForm, FormState, GENERIC_ERROR_MESSAGE, SUCCESS_MESSAGE,
    SubmissionStatus, SubmitError,
};
pub use transport::{
    InquiryTransport, RelayClient, SubmissionResponse, TransportError, Web3FormsClient,
    Web3FormsPayload,
};
