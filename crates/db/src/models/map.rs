//! Map document model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mapnotes_core::types::EntityId;
use mapnotes_core::validation::RequestBody;

use crate::models::annotation::Annotation;

/// A stored map: one JSON document per map, annotations embedded inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub id: EntityId,
    pub name: String,
    pub image_path: String,
    /// Insertion order is preserved across every mutation.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Map {
    /// Build a fresh map with no annotations.
    pub fn new(id: EntityId, input: &CreateMap) -> Self {
        Self {
            id,
            name: input.name.clone(),
            image_path: input.image_path.clone(),
            annotations: Vec::new(),
        }
    }

    /// Overwrite the fields present in `update`. `id` and `annotations`
    /// are never touched.
    pub fn apply_update(&mut self, update: &UpdateMap) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(image_path) = &update.image_path {
            self.image_path = image_path.clone();
        }
    }
}

/// Listing projection of a map. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub id: EntityId,
    pub name: String,
    pub image_path: String,
    pub annotation_count: usize,
}

/// DTO for creating a new map.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMap {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub image_path: String,
}

impl RequestBody for CreateMap {
    const REQUIRED: &'static [&'static str] = &["name", "image_path"];
    type Partial = UpdateMap;
}

/// DTO for updating a map. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMap {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub image_path: Option<String>,
}

impl RequestBody for UpdateMap {
    const REQUIRED: &'static [&'static str] = &[];
    type Partial = Self;
}
