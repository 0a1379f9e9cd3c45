pub mod health;
pub mod maps;
pub mod uploads;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service health
///
/// /maps                                            list, create
/// /maps/{id}                                       get, update, delete
/// /maps/{map_id}/annotations                       list, create
/// /maps/{map_id}/annotations/{id}                  get, update, delete
///
/// /uploads                                         upload image (POST)
/// /uploads/{filename}                              serve image
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        // Map routes (also nests annotations).
        .nest("/maps", maps::router())
        // Image uploads.
        .nest("/uploads", uploads::router(config.max_upload_bytes))
}
