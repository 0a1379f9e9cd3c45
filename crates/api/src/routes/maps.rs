//! Route definitions for the `/maps` resource.
//!
//! Also nests annotation routes under `/maps/{map_id}/annotations`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotation, map};
use crate::state::AppState;

/// Routes mounted at `/maps`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{map_id}/annotations              -> list_by_map
/// POST   /{map_id}/annotations              -> create
/// GET    /{map_id}/annotations/{id}         -> get_by_id
/// PUT    /{map_id}/annotations/{id}         -> update
/// DELETE /{map_id}/annotations/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    let annotation_routes = Router::new()
        .route("/", get(annotation::list_by_map).post(annotation::create))
        .route(
            "/{id}",
            get(annotation::get_by_id)
                .put(annotation::update)
                .delete(annotation::delete),
        );

    Router::new()
        .route("/", get(map::list).post(map::create))
        .route(
            "/{id}",
            get(map::get_by_id).put(map::update).delete(map::delete),
        )
        .nest("/{map_id}/annotations", annotation_routes)
}
