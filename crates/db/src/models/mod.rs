//! Document model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` entity struct matching the stored JSON
//! - A `Deserialize` + `Validate` create DTO
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod annotation;
pub mod map;
