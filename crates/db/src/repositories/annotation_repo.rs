//! Repository for annotations embedded in map documents.
//!
//! Annotations have no file of their own: every operation loads the parent
//! map through [`MapRepo`] and, when something changed, rewrites it whole.
//! A missing map and a missing annotation both come back as absence.

use mapnotes_core::types::new_id;

use crate::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};
use crate::repositories::MapRepo;
use crate::{JsonStore, StoreError};

/// Provides CRUD operations for the annotations of one map.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// All annotations of a map in stored order, or `None` if the map does
    /// not exist.
    pub async fn list(
        store: &JsonStore,
        map_id: &str,
    ) -> Result<Option<Vec<Annotation>>, StoreError> {
        Ok(MapRepo::load(store, map_id).await?.map(|map| map.annotations))
    }

    /// Find one annotation of a map by id.
    pub async fn find_by_id(
        store: &JsonStore,
        map_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        let Some(map) = MapRepo::load(store, map_id).await? else {
            return Ok(None);
        };
        Ok(map
            .annotations
            .into_iter()
            .find(|ann| ann.id == annotation_id))
    }

    /// Append a new annotation to the end of the map's list.
    ///
    /// Returns `None` if the map does not exist.
    pub async fn create(
        store: &JsonStore,
        map_id: &str,
        input: &CreateAnnotation,
    ) -> Result<Option<Annotation>, StoreError> {
        let Some(mut map) = MapRepo::load(store, map_id).await? else {
            return Ok(None);
        };
        let annotation = Annotation::new(new_id(), input)?;
        map.annotations.push(annotation.clone());
        MapRepo::save(store, &map).await?;
        Ok(Some(annotation))
    }

    /// Update an annotation in place, keeping its position.
    ///
    /// Returns `None` if the map or the annotation does not exist.
    pub async fn update(
        store: &JsonStore,
        map_id: &str,
        annotation_id: &str,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, StoreError> {
        let Some(mut map) = MapRepo::load(store, map_id).await? else {
            return Ok(None);
        };
        let Some(annotation) = map
            .annotations
            .iter_mut()
            .find(|ann| ann.id == annotation_id)
        else {
            return Ok(None);
        };
        annotation.apply_update(input)?;
        let updated = annotation.clone();
        MapRepo::save(store, &map).await?;
        Ok(Some(updated))
    }

    /// Remove an annotation by id; the others keep their relative order.
    ///
    /// Returns `true` if an annotation was removed. Nothing is written when
    /// the map or the annotation is missing.
    pub async fn delete(
        store: &JsonStore,
        map_id: &str,
        annotation_id: &str,
    ) -> Result<bool, StoreError> {
        let Some(mut map) = MapRepo::load(store, map_id).await? else {
            return Ok(false);
        };
        let before = map.annotations.len();
        map.annotations.retain(|ann| ann.id != annotation_id);
        if map.annotations.len() == before {
            return Ok(false);
        }
        MapRepo::save(store, &map).await?;
        Ok(true)
    }
}
