//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&JsonStore` as the first argument.

pub mod annotation_repo;
pub mod map_repo;

pub use annotation_repo::AnnotationRepo;
pub use map_repo::MapRepo;
