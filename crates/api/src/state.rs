use std::sync::Arc;

use mapnotes_db::JsonStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Handle to the map document directory.
    pub store: JsonStore,
    /// Server configuration (upload directory, limits).
    pub config: Arc<ServerConfig>,
}
