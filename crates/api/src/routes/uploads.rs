//! Route definitions for the `/uploads` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST   /                                  -> upload_image
/// GET    /{filename}                        -> serve_image
/// ```
///
/// `max_upload_bytes` replaces axum's default body limit for the upload
/// route only.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload::upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{filename}", get(upload::serve_image))
}
