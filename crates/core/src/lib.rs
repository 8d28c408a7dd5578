//! Hydra Studios Core - Shared booking inquiry types.
//!
//! This crate provides the types used across all Hydra Studios components:
//! - `site` - Mail relay service behind the website's contact form
//! - `client` - Submission controller and transports for the contact form
//! - `cli` - Command-line tool for sending inquiries
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps validation identical on both sides of the wire.
//!
//! # Modules
//!
//! - [`types`] - Studio and project catalogs, email addresses, and the
//!   contact form validation schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
