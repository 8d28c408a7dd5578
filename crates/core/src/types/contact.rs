//! Contact form validation schema.
//!
//! [`ContactFormInput`] is what the form holds while the visitor types:
//! plain strings and a checkbox. [`ContactFormInput::validate`] turns it
//! into a [`ContactInquiry`] (trimmed text, normalized email, typed
//! selections) or a [`FieldErrors`] map with one message per failing field.
//!
//! Both the browser-side controller and the mail relay run the same
//! validation, so a payload accepted by one is accepted by the other.

use core::fmt;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::catalog::{ProjectType, StudioId, UnknownIdentifier, studio_label};
use super::email::{Email, EmailError};

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Project,
    Message,
    Studio,
    DateRange,
    Privacy,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Project,
        Self::Message,
        Self::Studio,
        Self::DateRange,
        Self::Privacy,
    ];

    /// Field name as used in JSON payloads and error maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Project => "project",
            Self::Message => "message",
            Self::Studio => "studio",
            Self::DateRange => "dateRange",
            Self::Privacy => "privacy",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownIdentifier {
                kind: "field",
                value: s.to_owned(),
            })
    }
}

/// Why a single field failed validation.
///
/// The `Display` output is the message shown next to the input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{label} must be at most {max} characters")]
    TooLong { label: &'static str, max: usize },

    #[error("Email is invalid")]
    InvalidEmail,

    #[error("Please select a project type")]
    ProjectRequired,

    #[error("Please select a valid studio")]
    InvalidStudio,

    #[error("You must accept the privacy policy")]
    PrivacyNotAccepted,

    /// Message reported for the field by a remote validator.
    #[error("{0}")]
    Reported(String),
}

/// Validation failures keyed by field.
///
/// Serializes as a flat `{ "field": "message" }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn message(&self, field: ContactField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn insert(&mut self, field: ContactField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: ContactField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Merge messages reported by a remote validator.
    ///
    /// Keys that are not form fields are ignored.
    pub fn extend_reported<I, K, V>(&mut self, reported: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, message) in reported {
            if let Ok(field) = key.as_ref().parse::<ContactField>() {
                self.insert(field, FieldError::Reported(message.into()));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid contact form")?;
        for (i, (field, error)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(field, error)| (field.as_str(), error.to_string())),
        )
    }
}

/// Raw contact form values, as typed by the visitor.
///
/// Deserialization is lenient so that a sloppy payload produces field
/// errors instead of a parse failure: missing or `null` text fields become
/// empty strings, and `privacy` is only accepted when it is the JSON
/// literal `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormInput {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub project: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub studio: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub date_range: String,
    #[serde(default, deserialize_with = "literal_true")]
    pub privacy: bool,
}

impl ContactFormInput {
    pub const NAME_MAX_LENGTH: usize = 200;
    pub const PHONE_MAX_LENGTH: usize = 30;
    pub const MESSAGE_MAX_LENGTH: usize = 5000;
    pub const DATE_RANGE_MAX_LENGTH: usize = 200;

    /// Set one field from its string form.
    ///
    /// For [`ContactField::Privacy`] the checkbox is considered checked when
    /// the value is `"true"` or `"on"`.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Project => self.project = value,
            ContactField::Message => self.message = value,
            ContactField::Studio => self.studio = value,
            ContactField::DateRange => self.date_range = value,
            ContactField::Privacy => self.privacy = matches!(value.as_str(), "true" | "on"),
        }
    }

    /// Validate and normalize the form.
    ///
    /// Every field is checked; the error map holds one message for each
    /// failing field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] if any field fails its constraints.
    pub fn validate(&self) -> Result<ContactInquiry, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = record(
            &mut errors,
            ContactField::Name,
            required_text(&self.name, "Name", Self::NAME_MAX_LENGTH),
        );
        let email = record(&mut errors, ContactField::Email, parse_email(&self.email));
        let phone = record(
            &mut errors,
            ContactField::Phone,
            optional_text(&self.phone, "Phone", Self::PHONE_MAX_LENGTH),
        );
        let project = record(
            &mut errors,
            ContactField::Project,
            self.project
                .parse::<ProjectType>()
                .map_err(|_| FieldError::ProjectRequired),
        );
        let message = record(
            &mut errors,
            ContactField::Message,
            required_text(&self.message, "Message", Self::MESSAGE_MAX_LENGTH),
        );
        let studio = record(&mut errors, ContactField::Studio, parse_studio(&self.studio));
        let date_range = record(
            &mut errors,
            ContactField::DateRange,
            optional_text(&self.date_range, "Date range", Self::DATE_RANGE_MAX_LENGTH),
        );
        let privacy = record(
            &mut errors,
            ContactField::Privacy,
            if self.privacy {
                Ok(())
            } else {
                Err(FieldError::PrivacyNotAccepted)
            },
        );

        let (
            Some(name),
            Some(email),
            Some(phone),
            Some(project),
            Some(message),
            Some(studio),
            Some(date_range),
            Some(()),
        ) = (name, email, phone, project, message, studio, date_range, privacy)
        else {
            return Err(errors);
        };

        Ok(ContactInquiry {
            name,
            email,
            phone,
            project,
            message,
            studio,
            date_range,
        })
    }
}

/// A validated booking inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub project: ProjectType,
    pub message: String,
    pub studio: Option<StudioId>,
    pub date_range: String,
}

impl ContactInquiry {
    /// Display label of the selected project type.
    #[must_use]
    pub const fn project_label(&self) -> &'static str {
        self.project.label()
    }

    /// Display label of the preferred studio, or the no-preference label.
    #[must_use]
    pub const fn studio_label(&self) -> &'static str {
        studio_label(self.studio)
    }

    /// Form values that validate back into this inquiry.
    #[must_use]
    pub fn to_form_input(&self) -> ContactFormInput {
        ContactFormInput {
            name: self.name.clone(),
            email: self.email.to_string(),
            phone: self.phone.clone(),
            project: self.project.id().to_owned(),
            message: self.message.clone(),
            studio: self.studio.map(StudioId::id).unwrap_or_default().to_owned(),
            date_range: self.date_range.clone(),
            privacy: true,
        }
    }
}

fn record<T>(
    errors: &mut FieldErrors,
    field: ContactField,
    result: Result<T, FieldError>,
) -> Option<T> {
    result.map_err(|error| errors.insert(field, error)).ok()
}

fn required_text(value: &str, label: &'static str, max: usize) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required(label));
    }
    optional_text(trimmed, label, max)
}

fn optional_text(value: &str, label: &'static str, max: usize) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max {
        return Err(FieldError::TooLong { label, max });
    }
    Ok(trimmed.to_owned())
}

fn parse_email(value: &str) -> Result<Email, FieldError> {
    Email::parse(value).map_err(|e| match e {
        EmailError::Empty => FieldError::Required("Email"),
        EmailError::Invalid => FieldError::InvalidEmail,
        EmailError::TooLong { max } => FieldError::TooLong {
            label: "Email",
            max,
        },
    })
}

fn parse_studio(value: &str) -> Result<Option<StudioId>, FieldError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<StudioId>()
        .map(Some)
        .map_err(|_| FieldError::InvalidStudio)
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn literal_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> ContactFormInput {
        ContactFormInput {
            name: "Anna Svensson".to_string(),
            email: "anna@example.com".to_string(),
            phone: String::new(),
            project: "recording".to_string(),
            message: "I want to record an album.".to_string(),
            studio: String::new(),
            date_range: String::new(),
            privacy: true,
        }
    }

    fn error_for(input: &ContactFormInput, field: ContactField) -> Option<String> {
        input.validate().err().and_then(|e| e.message(field))
    }

    #[test]
    fn test_accepts_required_fields_only() {
        let inquiry = valid_input().validate().unwrap();
        assert_eq!(inquiry.project, ProjectType::Recording);
        assert_eq!(inquiry.studio, None);
        assert_eq!(inquiry.phone, "");
        assert_eq!(inquiry.date_range, "");
    }

    #[test]
    fn test_accepts_all_optional_fields() {
        let input = ContactFormInput {
            phone: "+46 70 123 4567".to_string(),
            studio: "costa".to_string(),
            date_range: "March 15-20, 2026".to_string(),
            ..valid_input()
        };
        let inquiry = input.validate().unwrap();
        assert_eq!(inquiry.studio, Some(StudioId::Costa));
        assert_eq!(inquiry.studio_label(), "Costa Leon");
        assert_eq!(inquiry.date_range, "March 15-20, 2026");
    }

    #[test]
    fn test_normalizes_text_and_email() {
        let input = ContactFormInput {
            name: "  Anna  ".to_string(),
            email: "  Anna@Example.COM  ".to_string(),
            message: "  Hello  ".to_string(),
            ..valid_input()
        };
        let inquiry = input.validate().unwrap();
        assert_eq!(inquiry.name, "Anna");
        assert_eq!(inquiry.email.as_str(), "anna@example.com");
        assert_eq!(inquiry.message, "Hello");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = ContactFormInput::default().validate().unwrap_err();
        let fields: Vec<ContactField> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::Project,
                ContactField::Message,
                ContactField::Privacy,
            ]
        );
        assert_eq!(errors.message(ContactField::Name).unwrap(), "Name is required");
        assert_eq!(errors.message(ContactField::Email).unwrap(), "Email is required");
        assert_eq!(
            errors.message(ContactField::Project).unwrap(),
            "Please select a project type"
        );
        assert_eq!(errors.message(ContactField::Message).unwrap(), "Message is required");
        assert_eq!(
            errors.message(ContactField::Privacy).unwrap(),
            "You must accept the privacy policy"
        );
    }

    #[test]
    fn test_whitespace_only_required_fields() {
        let input = ContactFormInput {
            name: "   ".to_string(),
            email: "   ".to_string(),
            message: "\n\t ".to_string(),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get(ContactField::Name), Some(&FieldError::Required("Name")));
        assert_eq!(errors.get(ContactField::Email), Some(&FieldError::Required("Email")));
        assert_eq!(
            errors.get(ContactField::Message),
            Some(&FieldError::Required("Message"))
        );
    }

    #[test]
    fn test_name_length_boundary() {
        let at_limit = ContactFormInput {
            name: "A".repeat(200),
            ..valid_input()
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = ContactFormInput {
            name: "A".repeat(201),
            ..valid_input()
        };
        assert_eq!(
            error_for(&over_limit, ContactField::Name).unwrap(),
            "Name must be at most 200 characters"
        );
    }

    #[test]
    fn test_message_length_boundary() {
        let at_limit = ContactFormInput {
            message: "A".repeat(5000),
            ..valid_input()
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = ContactFormInput {
            message: "A".repeat(5001),
            ..valid_input()
        };
        assert_eq!(
            error_for(&over_limit, ContactField::Message).unwrap(),
            "Message must be at most 5000 characters"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let input = ContactFormInput {
            name: "å".repeat(200),
            ..valid_input()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_email_length_boundary() {
        let at_limit = ContactFormInput {
            email: format!("{}@example.com", "a".repeat(242)),
            ..valid_input()
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = ContactFormInput {
            email: format!("{}@example.com", "a".repeat(243)),
            ..valid_input()
        };
        assert_eq!(
            error_for(&over_limit, ContactField::Email).unwrap(),
            "Email must be at most 254 characters"
        );
    }

    #[test]
    fn test_invalid_email_format() {
        for email in ["notanemail", "missing@", "@missing.com", "spaces in@email.com"] {
            let input = ContactFormInput {
                email: email.to_string(),
                ..valid_input()
            };
            assert_eq!(
                error_for(&input, ContactField::Email).as_deref(),
                Some("Email is invalid"),
                "expected {email:?} to be invalid"
            );
        }
    }

    #[test]
    fn test_project_must_be_known() {
        for project in ["", "invalid", "Recording"] {
            let input = ContactFormInput {
                project: project.to_string(),
                ..valid_input()
            };
            assert_eq!(
                error_for(&input, ContactField::Project).as_deref(),
                Some("Please select a project type")
            );
        }

        for project in ProjectType::ALL {
            let input = ContactFormInput {
                project: project.id().to_string(),
                ..valid_input()
            };
            assert_eq!(input.validate().unwrap().project, project);
        }
    }

    #[test]
    fn test_studio_empty_or_known() {
        let input = ContactFormInput {
            studio: "invalid".to_string(),
            ..valid_input()
        };
        assert_eq!(
            error_for(&input, ContactField::Studio).as_deref(),
            Some("Please select a valid studio")
        );

        for studio in StudioId::ALL {
            let input = ContactFormInput {
                studio: studio.id().to_string(),
                ..valid_input()
            };
            assert_eq!(input.validate().unwrap().studio, Some(studio));
        }
    }

    #[test]
    fn test_optional_field_limits() {
        let phone_ok = ContactFormInput {
            phone: "1".repeat(30),
            ..valid_input()
        };
        assert!(phone_ok.validate().is_ok());

        let phone_long = ContactFormInput {
            phone: "1".repeat(31),
            ..valid_input()
        };
        assert_eq!(
            error_for(&phone_long, ContactField::Phone).as_deref(),
            Some("Phone must be at most 30 characters")
        );

        let dates_ok = ContactFormInput {
            date_range: "A".repeat(200),
            ..valid_input()
        };
        assert!(dates_ok.validate().is_ok());

        let dates_long = ContactFormInput {
            date_range: "A".repeat(201),
            ..valid_input()
        };
        assert_eq!(
            error_for(&dates_long, ContactField::DateRange).as_deref(),
            Some("Date range must be at most 200 characters")
        );
    }

    #[test]
    fn test_optional_fields_are_trimmed_before_length_check() {
        let padded = ContactFormInput {
            phone: format!("  {}  ", "1".repeat(30)),
            date_range: format!(" {} ", "A".repeat(200)),
            ..valid_input()
        };
        let inquiry = padded.validate().unwrap();
        assert_eq!(inquiry.phone, "1".repeat(30));
        assert_eq!(inquiry.date_range, "A".repeat(200));

        let blank = ContactFormInput {
            phone: "   ".to_string(),
            ..valid_input()
        };
        assert!(blank.validate().unwrap().phone.is_empty());
    }

    #[test]
    fn test_privacy_must_be_accepted() {
        let input = ContactFormInput {
            privacy: false,
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(ContactField::Privacy),
            Some(&FieldError::PrivacyNotAccepted)
        );
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let input: ContactFormInput = serde_json::from_value(serde_json::json!({
            "name": "Anna",
            "email": "anna@example.com",
            "project": "mixing",
            "message": "Hi",
            "phone": null,
            "privacy": true
        }))
        .unwrap();
        assert_eq!(input.phone, "");
        assert_eq!(input.studio, "");
        assert_eq!(input.date_range, "");
        assert!(input.privacy);
    }

    #[test]
    fn test_deserialize_privacy_requires_literal_true() {
        for privacy in [
            serde_json::json!("true"),
            serde_json::json!(1),
            serde_json::json!("on"),
            serde_json::json!(false),
            serde_json::Value::Null,
        ] {
            let input: ContactFormInput =
                serde_json::from_value(serde_json::json!({ "privacy": privacy })).unwrap();
            assert!(!input.privacy, "{privacy} must not count as accepted");
        }

        let missing: ContactFormInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!missing.privacy);
    }

    #[test]
    fn test_deserialize_uses_camel_case() {
        let input: ContactFormInput =
            serde_json::from_value(serde_json::json!({ "dateRange": "June" })).unwrap();
        assert_eq!(input.date_range, "June");
    }

    #[test]
    fn test_set_field() {
        let mut input = ContactFormInput::default();
        input.set_field(ContactField::DateRange, "Next week");
        input.set_field(ContactField::Privacy, "on");
        assert_eq!(input.date_range, "Next week");
        assert!(input.privacy);

        input.set_field(ContactField::Privacy, "false");
        assert!(!input.privacy);
    }

    #[test]
    fn test_field_errors_serialize_as_flat_map() {
        let errors = ContactFormInput::default().validate().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"], "Name is required");
        assert_eq!(json["privacy"], "You must accept the privacy policy");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_extend_reported_ignores_unknown_keys() {
        let mut errors = FieldErrors::new();
        errors.extend_reported([("email", "Email is invalid"), ("captcha", "nope")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(ContactField::Email).unwrap(), "Email is invalid");
    }

    #[test]
    fn test_to_form_input_revalidates() {
        let input = ContactFormInput {
            email: "Anna@Example.com".to_string(),
            studio: "denniz".to_string(),
            ..valid_input()
        };
        let inquiry = input.validate().unwrap();
        let again = inquiry.to_form_input().validate().unwrap();
        assert_eq!(again, inquiry);
    }
}
