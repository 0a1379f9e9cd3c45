//! Map annotation API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! request extractors) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
