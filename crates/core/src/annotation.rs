//! Annotation kinds and the field bounds shared by maps and annotations.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length (characters) of a map name or an annotation title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length (characters) of an annotation description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// All valid annotation kind strings.
pub const VALID_KIND_STRINGS: &[&str] = &["city", "person", "event", "note"];

// ---------------------------------------------------------------------------
// Annotation kind
// ---------------------------------------------------------------------------

/// What an annotation marks on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    City,
    Person,
    Event,
    Note,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Person => "person",
            Self::Event => "event",
            Self::Note => "note",
        }
    }
}

impl FromStr for AnnotationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "city" => Ok(Self::City),
            "person" => Ok(Self::Person),
            "event" => Ok(Self::Event),
            "note" => Ok(Self::Note),
            _ => Err(CoreError::invalid_field(
                "type",
                "invalid_choice",
                invalid_kind_message(s),
            )),
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid_kind_message(s: &str) -> String {
    format!(
        "Invalid annotation type '{s}'. Must be one of: {}",
        VALID_KIND_STRINGS.join(", ")
    )
}

/// `validator` hook for the `type` field of annotation bodies.
pub fn validate_annotation_kind(kind: &str) -> Result<(), ValidationError> {
    if VALID_KIND_STRINGS.contains(&kind) {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_choice")
        .with_message(Cow::Owned(invalid_kind_message(kind)));
    err.add_param(Cow::Borrowed("value"), &kind);
    Err(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
