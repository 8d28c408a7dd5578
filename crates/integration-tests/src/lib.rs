//! Integration tests for Hydra Studios.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hydra-studios-integration-tests
//! ```
//!
//! No external services are needed: the mail relay runs in-process on an
//! ephemeral port with a [`RecordingMailer`], and Web3Forms is replaced by a
//! `wiremock` server.
//!
//! # Test Categories
//!
//! - `contact_relay` - Contact form to mail relay round trips
//! - `web3forms_client` - Direct Web3Forms submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use hydra_studios_core::ContactFormInput;
use hydra_studios_site::{
    app,
    config::SiteConfig,
    services::{MailError, Mailer, OutgoingEmail},
    state::AppState,
};
use tokio::task::JoinHandle;

/// Mailer that keeps every email instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    /// Emails delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());
        Ok(())
    }
}

/// A mail relay running on an ephemeral local port.
pub struct TestContext {
    pub base_url: String,
    pub mailer: Arc<RecordingMailer>,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start the site with default configuration and a recording mailer.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(SiteConfig::default(), mailer.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(
                listener,
                app(state).into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await;
        });

        Self {
            base_url: format!("http://{addr}"),
            mailer,
            server,
        }
    }

    /// Full URL of a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A filled-in form that passes validation.
#[must_use]
pub fn valid_form() -> ContactFormInput {
    ContactFormInput {
        name: "Anna Svensson".to_string(),
        email: "anna@example.com".to_string(),
        phone: "+46 70 123 4567".to_string(),
        project: "production".to_string(),
        message: "We want to record an EP.\nFour songs.".to_string(),
        studio: "costa".to_string(),
        date_range: "March 15-20".to_string(),
        privacy: true,
    }
}
