//! Field-level validation errors.
//!
//! Request bodies are checked field by field and every problem is reported
//! as a [`FieldError`]: explicit `null` values ([`reject_nulls`]), absent
//! required keys ([`missing_fields`]), values of the wrong shape
//! ([`decode_partial`]) and declared constraints from the `validator`
//! derive ([`field_errors`]).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use serde_path_to_error::Segment;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Longest string value echoed back in a [`FieldError`].
pub const MAX_REPORTED_VALUE_CHARS: usize = 200;

/// A single constraint violation on one field of a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, or `"body"` for whole-body problems.
    pub field: String,
    /// Machine-readable constraint name (`length`, `required`, `null`, ...).
    pub code: String,
    pub message: String,
    /// The offending value, when it is small enough to report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
            value: None,
        }
    }

    /// Attach the offending value if it is safe to echo back.
    pub fn with_value(mut self, value: &Value) -> Self {
        self.value = reportable(value);
        self
    }
}

fn reportable(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if s.chars().count() <= MAX_REPORTED_VALUE_CHARS => Some(value.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.clone()),
        _ => None,
    }
}

/// A request body whose problems can be reported for every field at once.
pub trait RequestBody: DeserializeOwned + Validate {
    /// Keys that must be present in the body.
    const REQUIRED: &'static [&'static str];

    /// The same body with every field optional and the same constraints,
    /// so present fields are still checked when required ones are missing.
    type Partial: DeserializeOwned + Validate;
}

/// Run the declared `validator` constraints on `input`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(field_errors(&errors)))
}

/// Flatten `validator` errors into [`FieldError`]s, sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let message = match &err.message {
                    Some(msg) => msg.to_string(),
                    None => describe(&err.code, &err.params),
                };
                let error = FieldError::new(&field, &err.code, message);
                match err.params.get("value") {
                    Some(value) => error.with_value(value),
                    None => error,
                }
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn describe<K>(code: &str, params: &std::collections::HashMap<K, Value>) -> String
where
    K: std::borrow::Borrow<str> + std::hash::Hash + Eq,
{
    match code {
        "length" => match (params.get("min"), params.get("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max} characters"),
            (None, Some(max)) => format!("must be at most {max} characters"),
            (Some(min), None) => format!("must be at least {min} characters"),
            (None, None) => "has an invalid length".to_string(),
        },
        other => format!("failed the '{other}' constraint"),
    }
}

/// Report every top-level key whose value is an explicit `null`.
///
/// No stored field is nullable, so `null` can never be a valid value: an
/// absent key means "leave unchanged", a `null` would mean "clear it".
pub fn reject_nulls(body: &Value) -> Vec<FieldError> {
    let Some(object) = body.as_object() else {
        return Vec::new();
    };
    let mut out: Vec<FieldError> = object
        .iter()
        .filter(|(_, value)| value.is_null())
        .map(|(key, _)| FieldError::new(key, "null", "may not be null"))
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Report every key of `required` that is absent from `object`.
pub fn missing_fields(object: &Map<String, Value>, required: &[&str]) -> Vec<FieldError> {
    required
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| FieldError::new(key, "required", "field is required"))
        .collect()
}

/// Decode `object` into an all-optional `P`, dropping and reporting each
/// top-level key whose value has the wrong shape.
///
/// Returns `None` only when the failure cannot be tied to a key.
pub fn decode_partial<P: DeserializeOwned>(
    mut object: Map<String, Value>,
) -> (Option<P>, Vec<FieldError>) {
    let mut errors = Vec::new();
    loop {
        let err = match serde_path_to_error::deserialize(Value::Object(object.clone())) {
            Ok(partial) => return (Some(partial), errors),
            Err(err) => err,
        };
        let key = match err.path().iter().next() {
            Some(Segment::Map { key }) => Some(key.clone()),
            _ => None,
        };
        match key.and_then(|key| object.remove(&key).map(|value| (key, value))) {
            Some((key, value)) => errors.push(
                FieldError::new(&key, "invalid_type", err.inner().to_string()).with_value(&value),
            ),
            None => {
                errors.push(decode_error(err.inner()));
                return (None, errors);
            }
        }
    }
}

/// Translate a bare `serde_json` decoding failure into a [`FieldError`].
///
/// Missing keys name their field; anything else is reported against the
/// body as a whole.
pub fn decode_error(err: &serde_json::Error) -> FieldError {
    let message = err.to_string();
    if let Some(field) = missing_field_name(&message) {
        return FieldError::new(field, "required", "field is required");
    }
    let code = if err.is_data() {
        "invalid_type"
    } else {
        "invalid_json"
    };
    FieldError::new("body", code, message)
}

fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
