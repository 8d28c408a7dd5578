//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//! POST /api/send-email  - Contact form mail relay (rate limited)
//! ```

pub mod contact;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{contact_rate_limiter, rate_limit_envelope};
use crate::state::AppState;

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/send-email", post(contact::send_email))
        .route_layer(contact_rate_limiter())
        .route_layer(axum::middleware::map_response(rate_limit_envelope))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the SMTP relay.
pub async fn health() -> &'static str {
    "ok"
}
