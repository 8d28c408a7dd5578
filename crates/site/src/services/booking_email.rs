//! Booking request email rendered from a validated inquiry.
//!
//! Uses Askama templates for both the HTML and plain-text bodies. The HTML
//! template escapes every inquirer-provided value.

use askama::Template;
use chrono::{DateTime, Utc};
use hydra_studios_core::ContactInquiry;

use super::mailer::{MailError, OutgoingEmail};

/// Subject line of booking request emails.
pub const BOOKING_REQUEST_SUBJECT: &str = "Ny bokningsförfrågan via Hydra Studios webbformulär";

/// HTML template for a booking request.
#[derive(Template)]
#[template(path = "email/booking_request.html")]
struct BookingRequestHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    project: &'a str,
    studio: &'a str,
    date_range: &'a str,
    message_lines: Vec<&'a str>,
    received_at: &'a str,
}

/// Plain text template for a booking request.
#[derive(Template)]
#[template(path = "email/booking_request.txt")]
struct BookingRequestText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    project: &'a str,
    studio: &'a str,
    date_range: &'a str,
    message: &'a str,
    received_at: &'a str,
}

/// Render the booking request email for `inquiry`.
///
/// Replies go straight to the inquirer.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn compose_booking_request(
    inquiry: &ContactInquiry,
    recipient: &str,
    received_at: DateTime<Utc>,
) -> Result<OutgoingEmail, MailError> {
    let received_at = received_at.format("%Y-%m-%d %H:%M UTC").to_string();

    let html_body = BookingRequestHtml {
        name: &inquiry.name,
        email: inquiry.email.as_str(),
        phone: &inquiry.phone,
        project: inquiry.project_label(),
        studio: inquiry.studio_label(),
        date_range: &inquiry.date_range,
        message_lines: inquiry.message.lines().collect(),
        received_at: &received_at,
    }
    .render()?;

    let text_body = BookingRequestText {
        name: &inquiry.name,
        email: inquiry.email.as_str(),
        phone: &inquiry.phone,
        project: inquiry.project_label(),
        studio: inquiry.studio_label(),
        date_range: &inquiry.date_range,
        message: &inquiry.message,
        received_at: &received_at,
    }
    .render()?;

    Ok(OutgoingEmail {
        to: recipient.to_string(),
        reply_to: Some(inquiry.email.to_string()),
        subject: BOOKING_REQUEST_SUBJECT.to_string(),
        text_body,
        html_body,
    })
}
