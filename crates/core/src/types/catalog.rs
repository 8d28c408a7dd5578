//! Studio and project catalogs.
//!
//! The contact form offers two closed selections: the kind of project and,
//! optionally, the studio or producer the inquirer wants to work with. Both
//! are submitted as opaque identifiers and mapped to display labels before
//! they reach a human.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label used when no studio preference was given.
pub const NO_STUDIO_PREFERENCE: &str = "Ingen preferens";

/// An identifier that is not part of a closed catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} identifier: {value:?}")]
pub struct UnknownIdentifier {
    /// Which catalog was searched.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Type of project the inquiry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Recording,
    Mixing,
    Mastering,
    Production,
    Other,
}

impl ProjectType {
    /// All project types, in the order the form lists them.
    pub const ALL: [Self; 5] = [
        Self::Recording,
        Self::Mixing,
        Self::Mastering,
        Self::Production,
        Self::Other,
    ];

    /// Form identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Mixing => "mixing",
            Self::Mastering => "mastering",
            Self::Production => "production",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recording => "Recording",
            Self::Mixing => "Mixing",
            Self::Mastering => "Mastering",
            Self::Production => "Full Production",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProjectType {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|project| project.id() == s)
            .ok_or_else(|| UnknownIdentifier {
                kind: "project",
                value: s.to_owned(),
            })
    }
}

/// Studio or producer the inquirer would like to book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudioId {
    Andreas,
    Costa,
    Simon,
    David,
    Peter,
    Angelino,
    Denniz,
    Thomas,
}

impl StudioId {
    /// All studios, in the order the form lists them.
    pub const ALL: [Self; 8] = [
        Self::Andreas,
        Self::Costa,
        Self::Simon,
        Self::David,
        Self::Peter,
        Self::Angelino,
        Self::Denniz,
        Self::Thomas,
    ];

    /// Form identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Andreas => "andreas",
            Self::Costa => "costa",
            Self::Simon => "simon",
            Self::David => "david",
            Self::Peter => "peter",
            Self::Angelino => "angelino",
            Self::Denniz => "denniz",
            Self::Thomas => "thomas",
        }
    }

    /// Full name of the studio owner or producer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Andreas => "Andreas \"Stone\" Johansson",
            Self::Costa => "Costa Leon",
            Self::Simon => "Simon Peyron",
            Self::David => "David Fremberg",
            Self::Peter => "Peter Zimny",
            Self::Angelino => "Angelino Markenhorn",
            Self::Denniz => "Denniz Jamm",
            Self::Thomas => "Thomas Wallén (Publishing)",
        }
    }
}

impl fmt::Display for StudioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StudioId {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|studio| studio.id() == s)
            .ok_or_else(|| UnknownIdentifier {
                kind: "studio",
                value: s.to_owned(),
            })
    }
}

/// Display label for an optional studio preference.
#[must_use]
pub const fn studio_label(studio: Option<StudioId>) -> &'static str {
    match studio {
        Some(studio) => studio.label(),
        None => NO_STUDIO_PREFERENCE,
    }
}

/// Display label for a raw studio identifier.
///
/// Empty or unrecognized identifiers fall back to [`NO_STUDIO_PREFERENCE`].
#[must_use]
pub fn studio_label_for_id(id: &str) -> &'static str {
    studio_label(id.parse().ok())
}

/// Display label for a raw project identifier.
///
/// Unrecognized identifiers are returned unchanged.
#[must_use]
pub fn project_label_for_id(id: &str) -> &str {
    id.parse::<ProjectType>().map_or(id, |project| project.label())
}
