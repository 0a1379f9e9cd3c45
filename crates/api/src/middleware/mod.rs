//! Request extractors.
//!
//! - [`validated_json::ValidatedJson`] -- Decodes and validates a JSON body,
//!   rejecting with field-level errors.

pub mod validated_json;
