//! Handlers for the `/maps` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mapnotes_core::types::EntityId;
use mapnotes_db::models::map::{CreateMap, Map, MapSummary, UpdateMap};
use mapnotes_db::repositories::MapRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

/// GET /api/maps
///
/// Summaries of every stored map, ordered by name.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MapSummary>>> {
    let maps = MapRepo::list(&state.store).await?;
    Ok(Json(maps))
}

/// POST /api/maps
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMap>,
) -> AppResult<(StatusCode, Json<Map>)> {
    let map = MapRepo::create(&state.store, &input).await?;
    tracing::info!(map_id = %map.id, name = %map.name, "Map created");
    Ok((StatusCode::CREATED, Json(map)))
}

/// GET /api/maps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Map>> {
    let map = MapRepo::find_by_id(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Map", &id))?;
    Ok(Json(map))
}

/// PUT /api/maps/{id}
///
/// Only the fields present in the body change; annotations are untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    ValidatedJson(input): ValidatedJson<UpdateMap>,
) -> AppResult<Json<Map>> {
    let map = MapRepo::update(&state.store, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Map", &id))?;
    Ok(Json(map))
}

/// DELETE /api/maps/{id}
///
/// Removes the map together with all of its annotations.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if MapRepo::delete(&state.store, &id).await? {
        tracing::info!(map_id = %id, "Map deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Map", &id))
    }
}
