//! Contact form controller.
//!
//! Owns the state of one form instance and runs the submission pipeline:
//! validate, send through the transport, interpret the answer, update state.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --submit(valid)--> submitting --success--> Success (values reset)
//!                                    \--failure--> Error(message) (values kept)
//! ```
//!
//! At most one submission is in flight per form. The state lock is released
//! while the request is awaited, so the form can be rendered (with a
//! disabled, busy submit button) in the meantime. Dropping a pending
//! `submit` future (timeout, `select!`, task abort) clears the in-flight
//! flag, leaving values and status as they were.

use std::sync::atomic::{AtomicBool, Ordering};

use hydra_studios_core::{ContactField, ContactFormInput, FieldErrors};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::transport::{InquiryTransport, SubmissionResponse, TransportError};

/// Shown after a successful submission.
pub const SUCCESS_MESSAGE: &str =
    "Your message has been sent successfully! We'll get back to you soon.";

/// Shown when a failure carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str =
    "There was an error sending your message. Please try again.";

/// Shown when the relay rejected individual fields.
pub const CORRECT_FIELDS_MESSAGE: &str = "Please correct the errors in the form.";

const SUBMIT_LABEL: &str = "Send Inquiry";
const BUSY_LABEL: &str = "Sending...";

/// Result of the last submission attempt, as rendered under the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error(String),
}

impl SubmissionStatus {
    /// Banner text for the status, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Success => Some(SUCCESS_MESSAGE),
            Self::Error(message) => Some(message),
        }
    }
}

/// Everything the form renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: ContactFormInput,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    pub submitting: bool,
}

/// Why a call to [`ContactForm::submit`] did not deliver the inquiry.
///
/// The same information is reflected in [`FormState`]; the error is
/// returned for callers without a UI, such as the CLI.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Client-side validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(FieldErrors),

    /// A submission from this form is already in flight.
    #[error("A submission is already in progress")]
    InFlight,

    /// The endpoint answered with `success: false`.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// No usable answer was received.
    #[error("Submission failed: {0}")]
    Transport(#[from] TransportError),
}

/// A contact form bound to a transport.
pub struct ContactForm<T> {
    transport: T,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, including when the
/// `submit` future is dropped mid-request.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: InquiryTransport> ContactForm<T> {
    /// Create an empty form.
    pub fn new(transport: T) -> Self {
        Self::with_values(transport, ContactFormInput::default())
    }

    /// Create a form pre-filled with `values`.
    pub fn with_values(transport: T, values: ContactFormInput) -> Self {
        Self {
            transport,
            state: Mutex::new(FormState {
                values,
                ..FormState::default()
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The transport this form submits through.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> FormState {
        let state = self.state.lock().await;
        FormState {
            submitting: self.in_flight.load(Ordering::Acquire),
            ..state.clone()
        }
    }

    /// Update one field and clear its error.
    pub async fn set_field(&self, field: ContactField, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.values.set_field(field, value);
        state.errors.remove(field);
    }

    /// Check or uncheck the privacy consent box.
    pub async fn set_privacy(&self, accepted: bool) {
        let mut state = self.state.lock().await;
        state.values.privacy = accepted;
        state.errors.remove(ContactField::Privacy);
    }

    /// Whether the submit button is disabled.
    pub async fn is_submit_disabled(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Text of the submit button.
    pub async fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled().await {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Validate and send the form.
    ///
    /// On success the fields are reset. On any failure the values are left
    /// as they were so the visitor can fix them and submit again; there is
    /// no automatic retry.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] when validation fails (no request is made)
    /// - [`SubmitError::InFlight`] when a previous submission has not finished
    /// - [`SubmitError::Rejected`] when the endpoint reports failure
    /// - [`SubmitError::Transport`] when the request itself fails
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let (inquiry, in_flight) = {
            let mut state = self.state.lock().await;
            if self.in_flight.load(Ordering::Acquire) {
                return Err(SubmitError::InFlight);
            }

            match state.values.validate() {
                Ok(inquiry) => {
                    state.errors.clear();
                    state.status = SubmissionStatus::Idle;
                    self.in_flight.store(true, Ordering::Release);
                    (inquiry, InFlightGuard(&self.in_flight))
                }
                Err(errors) => {
                    tracing::debug!(fields = errors.len(), "Contact form failed validation");
                    state.errors = errors.clone();
                    return Err(SubmitError::Invalid(errors));
                }
            }
        };

        let result = self.transport.send(&inquiry).await;

        let mut state = self.state.lock().await;
        drop(in_flight);

        match result {
            Ok(SubmissionResponse { success: true, .. }) => {
                tracing::info!(project = %inquiry.project, "Inquiry submitted");
                state.values = ContactFormInput::default();
                state.errors.clear();
                state.status = SubmissionStatus::Success;
                Ok(())
            }
            Ok(SubmissionResponse {
                message, errors, ..
            }) => {
                let message = match errors {
                    Some(reported) if !reported.is_empty() => {
                        state.errors.extend_reported(reported);
                        CORRECT_FIELDS_MESSAGE.to_string()
                    }
                    _ => message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                };
                tracing::warn!(message = %message, "Inquiry rejected by endpoint");
                state.status = SubmissionStatus::Error(message.clone());
                Err(SubmitError::Rejected(message))
            }
            Err(e) => {
                tracing::error!(error = %e, "Inquiry submission failed");
                let message = e.user_message();
                state.status = SubmissionStatus::Error(if message.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    message
                });
                Err(SubmitError::Transport(e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use hydra_studios_core::{ContactInquiry, FieldError, StudioId};
    use tokio::sync::{Notify, mpsc};

    use super::*;

    /// Transport that answers with a fixed response and records what it saw.
    struct StubTransport {
        response: Result<SubmissionResponse, u16>,
        calls: AtomicUsize,
        seen: std::sync::Mutex<Vec<ContactInquiry>>,
    }

    impl StubTransport {
        fn answering(response: SubmissionResponse) -> Self {
            Self {
                response: Ok(response),
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn failing_with_status(status: u16) -> Self {
            Self {
                response: Err(status),
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InquiryTransport for StubTransport {
        async fn send(
            &self,
            inquiry: &ContactInquiry,
        ) -> Result<SubmissionResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(inquiry.clone());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(status) => Err(TransportError::Status {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    /// Transport that blocks until released.
    struct GatedTransport {
        started: mpsc::UnboundedSender<()>,
        release: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InquiryTransport for GatedTransport {
        async fn send(
            &self,
            _inquiry: &ContactInquiry,
        ) -> Result<SubmissionResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.started.send(());
            self.release.notified().await;
            Ok(SubmissionResponse {
                success: true,
                ..SubmissionResponse::default()
            })
        }
    }

    /// Transport whose request never completes.
    struct HangingTransport;

    #[async_trait]
    impl InquiryTransport for HangingTransport {
        async fn send(
            &self,
            _inquiry: &ContactInquiry,
        ) -> Result<SubmissionResponse, TransportError> {
            std::future::pending().await
        }
    }

    fn success() -> SubmissionResponse {
        SubmissionResponse {
            success: true,
            ..SubmissionResponse::default()
        }
    }

    async fn fill_required_fields<T: InquiryTransport>(form: &ContactForm<T>) {
        form.set_field(ContactField::Name, "Anna Svensson").await;
        form.set_field(ContactField::Email, "anna@example.com").await;
        form.set_field(ContactField::Project, "recording").await;
        form.set_field(ContactField::Message, "I want to record an album.")
            .await;
        form.set_privacy(true).await;
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_transport() {
        let form = ContactForm::new(StubTransport::answering(success()));

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(form.transport().calls(), 0);

        let state = form.state().await;
        assert_eq!(
            state.errors.message(ContactField::Name).as_deref(),
            Some("Name is required")
        );
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert!(!state.submitting);
    }

    #[tokio::test]
    async fn test_missing_privacy_blocks_submission() {
        let form = ContactForm::new(StubTransport::answering(success()));
        fill_required_fields(&form).await;
        form.set_privacy(false).await;

        let err = form.submit().await.unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(ContactField::Privacy),
            Some(&FieldError::PrivacyNotAccepted)
        );
        assert_eq!(form.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_editing_a_field_clears_its_error() {
        let form = ContactForm::new(StubTransport::answering(success()));
        let _ = form.submit().await;
        assert!(form.state().await.errors.get(ContactField::Email).is_some());

        form.set_field(ContactField::Email, "a").await;
        let state = form.state().await;
        assert!(state.errors.get(ContactField::Email).is_none());
        assert!(state.errors.get(ContactField::Name).is_some());
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let form = ContactForm::new(StubTransport::answering(success()));
        fill_required_fields(&form).await;
        form.set_field(ContactField::Studio, "simon").await;

        form.submit().await.unwrap();

        let state = form.state().await;
        assert_eq!(state.values, ContactFormInput::default());
        assert!(state.errors.is_empty());
        assert_eq!(state.status, SubmissionStatus::Success);
        assert_eq!(state.status.message(), Some(SUCCESS_MESSAGE));

        let seen = form.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].studio, Some(StudioId::Simon));
        assert_eq!(seen[0].email.as_str(), "anna@example.com");
    }

    #[tokio::test]
    async fn test_rejection_keeps_values_and_shows_remote_message() {
        let form = ContactForm::new(StubTransport::answering(SubmissionResponse {
            success: false,
            message: Some("Rate limit exceeded".to_string()),
            errors: None,
        }));
        fill_required_fields(&form).await;
        let before = form.state().await.values;

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(ref m) if m == "Rate limit exceeded"));

        let state = form.state().await;
        assert_eq!(state.values, before);
        assert_eq!(
            state.status,
            SubmissionStatus::Error("Rate limit exceeded".to_string())
        );
        assert!(!state.submitting);
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let form = ContactForm::new(StubTransport::answering(SubmissionResponse::default()));
        fill_required_fields(&form).await;

        let _ = form.submit().await;
        assert_eq!(
            form.state().await.status,
            SubmissionStatus::Error(GENERIC_ERROR_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_rejection_with_field_errors_maps_them() {
        let mut reported = BTreeMap::new();
        reported.insert("email".to_string(), "Email is invalid".to_string());
        let form = ContactForm::new(StubTransport::answering(SubmissionResponse {
            success: false,
            message: Some("Validation failed".to_string()),
            errors: Some(reported),
        }));
        fill_required_fields(&form).await;

        let _ = form.submit().await;
        let state = form.state().await;
        assert_eq!(
            state.errors.message(ContactField::Email).as_deref(),
            Some("Email is invalid")
        );
        assert_eq!(
            state.status,
            SubmissionStatus::Error(CORRECT_FIELDS_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_values() {
        let form = ContactForm::new(StubTransport::failing_with_status(502));
        fill_required_fields(&form).await;

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));

        let state = form.state().await;
        assert_eq!(state.values.name, "Anna Svensson");
        assert_eq!(
            state.status,
            SubmissionStatus::Error(
                "Unexpected response from submission endpoint (HTTP 502)".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_only_one_submission_in_flight() {
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());
        let form = Arc::new(ContactForm::new(GatedTransport {
            started: started_tx,
            release: Arc::clone(&release),
            calls: AtomicUsize::new(0),
        }));
        fill_required_fields(&form).await;

        let pending = tokio::spawn({
            let form = Arc::clone(&form);
            async move { form.submit().await }
        });
        started_rx.recv().await.unwrap();

        assert!(form.is_submit_disabled().await);
        assert_eq!(form.submit_label().await, "Sending...");
        assert!(matches!(form.submit().await, Err(SubmitError::InFlight)));

        release.notify_one();
        pending.await.unwrap().unwrap();

        assert!(!form.is_submit_disabled().await);
        assert_eq!(form.submit_label().await, "Send Inquiry");
        assert_eq!(form.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_submission_leaves_form_editable() {
        let form = ContactForm::new(HangingTransport);
        fill_required_fields(&form).await;
        let before = form.state().await.values;

        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(50), form.submit()).await;
        assert!(outcome.is_err());

        let state = form.state().await;
        assert!(!state.submitting);
        assert_eq!(state.values, before);
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert!(!form.is_submit_disabled().await);
        assert_eq!(form.submit_label().await, "Send Inquiry");

        // A fresh attempt reaches the transport instead of reporting InFlight
        let retry =
            tokio::time::timeout(std::time::Duration::from_millis(50), form.submit()).await;
        assert!(retry.is_err());
    }

    #[tokio::test]
    async fn test_resubmit_after_failure() {
        let form = ContactForm::new(StubTransport::failing_with_status(500));
        fill_required_fields(&form).await;

        assert!(form.submit().await.is_err());
        assert!(form.submit().await.is_err());
        assert_eq!(form.transport().calls(), 2);
    }
}
