//! Domain building blocks shared by the store and the HTTP layer: the error
//! taxonomy, field-level validation, ids and annotation kinds.

pub mod annotation;
pub mod error;
pub mod types;
pub mod validation;
