//! Annotation model and DTOs. Annotations only exist embedded in a [`Map`].
//!
//! [`Map`]: crate::models::map::Map

use serde::{Deserialize, Serialize};
use validator::Validate;

use mapnotes_core::annotation::{validate_annotation_kind, AnnotationKind};
use mapnotes_core::error::CoreError;
use mapnotes_core::types::EntityId;
use mapnotes_core::validation::RequestBody;

/// A labeled point on a map image. `id` is unique within its map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Annotation {
    pub fn new(id: EntityId, input: &CreateAnnotation) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            kind: input.kind.parse()?,
            x: input.x,
            y: input.y,
            title: input.title.clone(),
            description: input.description.clone(),
        })
    }

    /// Overwrite the fields present in `update`; `id` is immutable.
    ///
    /// The kind is parsed before anything is written, so a rejected update
    /// leaves the annotation untouched.
    pub fn apply_update(&mut self, update: &UpdateAnnotation) -> Result<(), CoreError> {
        let kind = update
            .kind
            .as_deref()
            .map(str::parse::<AnnotationKind>)
            .transpose()?;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        Ok(())
    }
}

/// DTO for creating a new annotation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnotation {
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_annotation_kind"))]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

impl RequestBody for CreateAnnotation {
    const REQUIRED: &'static [&'static str] = &["type", "x", "y", "title"];
    type Partial = UpdateAnnotation;
}

/// DTO for updating an annotation. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnotation {
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_annotation_kind"))]
    pub kind: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl RequestBody for UpdateAnnotation {
    const REQUIRED: &'static [&'static str] = &[];
    type Partial = Self;
}
