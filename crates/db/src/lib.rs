//! JSON document storage for maps and their embedded annotations.
//!
//! Every map lives in its own `<id>.json` file under the maps directory.
//! Repositories take a [`JsonStore`] as their first argument and re-read the
//! file on every call; nothing is cached between calls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mapnotes_core::types::is_canonical_id;

pub mod models;
pub mod repositories;

/// Errors raised by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading, writing or removing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document addressed by id could not be decoded.
    #[error("Corrupt document {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document's `id` does not match the key it is stored under.
    #[error("Document {} holds id {found}", path.display())]
    KeyMismatch { path: PathBuf, found: String },

    /// A document could not be serialized for writing.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// The input was rejected by a domain rule.
    #[error(transparent)]
    Invalid(#[from] mapnotes_core::error::CoreError),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Handle to the directory holding map documents.
///
/// Cheap to clone; clones share the same directory path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    maps_dir: Arc<Path>,
}

impl JsonStore {
    pub fn maps_dir(&self) -> &Path {
        &self.maps_dir
    }

    /// Storage location of the document for `id`.
    ///
    /// Returns `None` for ids that were never issued by this store, which
    /// callers treat the same as a missing document.
    pub fn document_path(&self, id: &str) -> Option<PathBuf> {
        is_canonical_id(id).then(|| self.maps_dir.join(format!("{id}.json")))
    }

    /// Recover the id from a document path, if the path names a document.
    pub(crate) fn id_from_path(path: &Path) -> Option<&str> {
        if path.extension()? != "json" {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        is_canonical_id(stem).then_some(stem)
    }
}

/// Open the store rooted at `maps_dir`, creating the directory if needed.
pub async fn open_store(maps_dir: impl Into<PathBuf>) -> Result<JsonStore, StoreError> {
    let maps_dir = maps_dir.into();
    tokio::fs::create_dir_all(&maps_dir)
        .await
        .map_err(|e| StoreError::io(&maps_dir, e))?;
    tracing::debug!(path = %maps_dir.display(), "Opened map store");
    Ok(JsonStore {
        maps_dir: Arc::from(maps_dir),
    })
}

/// Verify that the maps directory is still present and is a directory.
pub async fn health_check(store: &JsonStore) -> Result<(), StoreError> {
    let meta = tokio::fs::metadata(store.maps_dir())
        .await
        .map_err(|e| StoreError::io(store.maps_dir(), e))?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(StoreError::io(
            store.maps_dir(),
            std::io::Error::other("not a directory"),
        ))
    }
}
