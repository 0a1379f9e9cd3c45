//! Handlers for map image uploads.
//!
//! Images are stored flat in the uploads directory under a fresh
//! `<uuid>.<ext>` name; the client's filename only contributes its extension.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mapnotes_core::types::new_id;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Image extensions accepted for upload and served back.
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Name the image was stored under.
    pub filename: String,
    /// Path the image can be fetched from.
    pub url: String,
}

/// POST /api/uploads
///
/// Accepts a multipart form with a required `file` field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".into()));
    }
    let ext = allowed_extension(&filename).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported image format. Supported: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        ))
    })?;

    let uploads_dir = state.config.uploads_dir();
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_filename = format!("{}.{ext}", new_id());
    tokio::fs::write(uploads_dir.join(&stored_filename), &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(
        filename = %stored_filename,
        client_filename = %filename,
        size = data.len(),
        "Image uploaded",
    );

    let url = format!("/api/uploads/{stored_filename}");
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            filename: stored_filename,
            url,
        }),
    ))
}

/// GET /api/uploads/{filename}
pub async fn serve_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    if !is_safe_filename(&filename) {
        return Err(AppError::not_found("Upload", &filename));
    }

    let path = state.config.uploads_dir().join(&filename);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("Upload", &filename));
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for_extension(&filename)),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400"),
            ),
        ],
        data,
    )
        .into_response())
}

/// Lowercased extension of `filename` if it names an accepted image type.
fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// A single, non-hidden path component.
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\', '\0'])
}

/// Guess a Content-Type from a file extension.
fn content_type_for_extension(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
