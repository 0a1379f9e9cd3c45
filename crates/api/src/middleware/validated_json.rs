//! JSON body extractor that runs field validation before the handler.

use axum::extract::{FromRequest, Request};
use axum::Json;
use mapnotes_core::error::CoreError;
use mapnotes_core::validation::{
    decode_error, decode_partial, field_errors, missing_fields, reject_nulls, validate_input,
    RequestBody,
};
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;

/// A request body that decoded into `T` and passed `T`'s declared
/// constraints.
///
/// Any failure rejects the request with `400` and a list of field errors,
/// so handlers only ever see valid input:
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateMap>) -> AppResult<Json<Map>> {
///     // `input.name` is 1..=200 characters here.
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestBody + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                CoreError::invalid_field("body", "invalid_json", rejection.body_text())
            })?;
        Ok(ValidatedJson(decode_body(body)?))
    }
}

/// Turn a raw JSON body into a validated `T`.
///
/// The body must be a JSON object. Every problem is collected before
/// failing: explicit `null`s, missing required keys, values of the wrong
/// shape and constraint violations on the fields that are present.
pub fn decode_body<T: RequestBody>(body: Value) -> Result<T, CoreError> {
    let mut errors = reject_nulls(&body);
    let Value::Object(object) = body else {
        return Err(CoreError::invalid_field(
            "body",
            "invalid_type",
            "request body must be a JSON object",
        ));
    };

    errors.extend(missing_fields(&object, T::REQUIRED));
    let (partial, shape_errors) = decode_partial::<T::Partial>(object.clone());
    errors.extend(shape_errors);
    if let Some(Err(constraint_errors)) = partial.map(|p| p.validate()) {
        errors.extend(field_errors(&constraint_errors));
    }

    if !errors.is_empty() {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        return Err(CoreError::Validation(errors));
    }

    let input: T = serde_json::from_value(Value::Object(object))
        .map_err(|e| CoreError::Validation(vec![decode_error(&e)]))?;
    validate_input(&input)?;
    Ok(input)
}
