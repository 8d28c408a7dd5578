//! Core types for Hydra Studios.
//!
//! This module provides type-safe wrappers for the booking inquiry domain.

pub mod catalog;
pub mod contact;
pub mod email;

pub use catalog::{
    NO_STUDIO_PREFERENCE, ProjectType, StudioId, UnknownIdentifier, project_label_for_id,
    studio_label, studio_label_for_id,
};
pub use contact::{ContactField, ContactFormInput, ContactInquiry, FieldError, FieldErrors};
pub use email::{Email, EmailError};
