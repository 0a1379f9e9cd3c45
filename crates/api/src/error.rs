use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mapnotes_core::error::CoreError;
use mapnotes_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mapnotes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        AppError::Core(CoreError::NotFound {
            entity,
            id: id.to_string(),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => core_response(core),

            // A domain rule tripped inside the store is still the caller's fault.
            AppError::Store(StoreError::Invalid(core)) => core_response(core),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal_response()
            }

            AppError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_response()
            }
        }
    }
}

fn core_response(err: CoreError) -> Response {
    match err {
        CoreError::NotFound { entity, id } => error_body(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(details) => {
            let body = json!({
                "error": "Request validation failed",
                "code": "VALIDATION_ERROR",
                "details": details,
            });
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        }
    }
}

fn internal_response() -> Response {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn error_body(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapnotes_core::validation::FieldError;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("Map", "abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = CoreError::Validation(vec![FieldError::new("name", "length", "too long")]);
        let response = AppError::Core(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_validation_maps_to_400() {
        let err = StoreError::Invalid(CoreError::invalid_field("type", "invalid_choice", "bad"));
        let response = AppError::Store(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_failure_maps_to_500() {
        let err = StoreError::Io {
            path: "/data/maps".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let response = AppError::Store(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
