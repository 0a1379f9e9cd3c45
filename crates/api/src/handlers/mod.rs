//! Request handlers.
//!
//! Each submodule provides async handler functions (create, list, get_by_id,
//! update, delete) for a single resource. Handlers delegate to the
//! corresponding repository in `mapnotes_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod annotation;
pub mod map;
pub mod upload;
