//! Handlers for annotations.
//!
//! Annotations are nested under maps:
//! `/maps/{map_id}/annotations[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mapnotes_core::types::EntityId;
use mapnotes_db::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};
use mapnotes_db::repositories::AnnotationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

/// GET /api/maps/{map_id}/annotations
///
/// Annotations in the order they were added.
pub async fn list_by_map(
    State(state): State<AppState>,
    Path(map_id): Path<EntityId>,
) -> AppResult<Json<Vec<Annotation>>> {
    let annotations = AnnotationRepo::list(&state.store, &map_id)
        .await?
        .ok_or_else(|| AppError::not_found("Map", &map_id))?;
    Ok(Json(annotations))
}

/// POST /api/maps/{map_id}/annotations
pub async fn create(
    State(state): State<AppState>,
    Path(map_id): Path<EntityId>,
    ValidatedJson(input): ValidatedJson<CreateAnnotation>,
) -> AppResult<(StatusCode, Json<Annotation>)> {
    let annotation = AnnotationRepo::create(&state.store, &map_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Map", &map_id))?;
    tracing::info!(
        map_id = %map_id,
        annotation_id = %annotation.id,
        kind = %annotation.kind,
        "Annotation created",
    );
    Ok((StatusCode::CREATED, Json(annotation)))
}

/// GET /api/maps/{map_id}/annotations/{id}
///
/// A missing map and a missing annotation are reported the same way.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((map_id, id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<Annotation>> {
    let annotation = AnnotationRepo::find_by_id(&state.store, &map_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Annotation", &id))?;
    Ok(Json(annotation))
}

/// PUT /api/maps/{map_id}/annotations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((map_id, id)): Path<(EntityId, EntityId)>,
    ValidatedJson(input): ValidatedJson<UpdateAnnotation>,
) -> AppResult<Json<Annotation>> {
    let annotation = AnnotationRepo::update(&state.store, &map_id, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Annotation", &id))?;
    Ok(Json(annotation))
}

/// DELETE /api/maps/{map_id}/annotations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((map_id, id)): Path<(EntityId, EntityId)>,
) -> AppResult<StatusCode> {
    if AnnotationRepo::delete(&state.store, &map_id, &id).await? {
        tracing::info!(map_id = %map_id, annotation_id = %id, "Annotation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Annotation", &id))
    }
}
