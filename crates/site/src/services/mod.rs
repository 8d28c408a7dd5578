//! Business logic services for the site.
//!
//! # Services
//!
//! - `booking_email` - Renders a validated inquiry into the booking request email
//! - `mailer` - Email delivery (SMTP via lettre, or logging in development)

pub mod booking_email;
pub mod mailer;

pub use booking_email::{BOOKING_REQUEST_SUBJECT, compose_booking_request};
pub use mailer::{LogMailer, MailError, Mailer, OutgoingEmail, SmtpMailer};
