//! Repository for map documents.
//!
//! Every mutation is a whole-document read-modify-write: load the map,
//! change it in memory, rewrite the file. There is no locking, so two
//! concurrent writers on the same map can lose one of the changes, but
//! neither fails and no reader sees a partial document.

use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::IgnoredAny;
use serde::Deserialize;

use mapnotes_core::types::new_id;

use crate::models::map::{CreateMap, Map, MapSummary, UpdateMap};
use crate::{JsonStore, StoreError};

/// Just enough of a stored map to build its summary.
#[derive(Deserialize)]
struct StoredSummary {
    id: String,
    name: String,
    image_path: String,
    #[serde(default)]
    annotations: Vec<IgnoredAny>,
}

/// Provides CRUD operations for maps.
pub struct MapRepo;

impl MapRepo {
    /// Summaries of every readable map, ordered by name then id.
    ///
    /// Documents that cannot be read or decoded, whose `id` does not match
    /// their filename, or whose filename is not a map id are logged and
    /// skipped. Non-`.json` entries such as staging files are ignored.
    pub async fn list(store: &JsonStore) -> Result<Vec<MapSummary>, StoreError> {
        let dir = store.maps_dir();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(dir, e))?
        {
            let path = entry.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            let Some(id) = JsonStore::id_from_path(&path) else {
                tracing::warn!(path = %path.display(), "Skipping map document with a foreign filename");
                continue;
            };
            match read_summary(&path, id).await {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Skipping unreadable map document");
                }
            }
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Find a map by id, including its annotations.
    pub async fn find_by_id(store: &JsonStore, id: &str) -> Result<Option<Map>, StoreError> {
        Self::load(store, id).await
    }

    /// Create a map with a fresh id and no annotations.
    pub async fn create(store: &JsonStore, input: &CreateMap) -> Result<Map, StoreError> {
        let map = Map::new(new_id(), input);
        Self::save(store, &map).await?;
        Ok(map)
    }

    /// Update a map. Only `Some` fields in `input` are applied.
    ///
    /// Returns `None` if no map with the given `id` exists. An empty update
    /// still rewrites the document.
    pub async fn update(
        store: &JsonStore,
        id: &str,
        input: &UpdateMap,
    ) -> Result<Option<Map>, StoreError> {
        let Some(mut map) = Self::load(store, id).await? else {
            return Ok(None);
        };
        map.apply_update(input);
        Self::save(store, &map).await?;
        Ok(Some(map))
    }

    /// Delete a map and, with it, all of its annotations.
    /// Returns `true` if a document was removed.
    pub async fn delete(store: &JsonStore, id: &str) -> Result<bool, StoreError> {
        let Some(path) = store.document_path(id) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// Read and decode the document for `id`.
    pub(crate) async fn load(store: &JsonStore, id: &str) -> Result<Option<Map>, StoreError> {
        let Some(path) = store.document_path(id) else {
            return Ok(None);
        };
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        let map: Map = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        if map.id != id {
            return Err(StoreError::KeyMismatch { path, found: map.id });
        }
        tracing::debug!(map_id = %id, annotations = map.annotations.len(), "Loaded map");
        Ok(Some(map))
    }

    /// Serialize the whole map and replace its document.
    ///
    /// Each save writes its own uniquely named staging file and renames it
    /// over the old document, so readers see either the previous or the new
    /// version and concurrent saves of one map never share a scratch file.
    /// A staging file is removed again if the write or the rename fails.
    pub(crate) async fn save(store: &JsonStore, map: &Map) -> Result<(), StoreError> {
        let path = store
            .document_path(&map.id)
            .ok_or_else(|| StoreError::KeyMismatch {
                path: store.maps_dir().to_path_buf(),
                found: map.id.clone(),
            })?;
        let body = serde_json::to_vec_pretty(map)?;

        let dir = store.maps_dir().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io(&dir, e))?;

        let prefix = format!(".{}.", map.id);
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut staging = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".json.tmp")
                .tempfile_in(&dir)?;
            staging.write_all(&body)?;
            staging.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::io(&path, std::io::Error::other(e)))?
        .map_err(|e| StoreError::io(&path, e))?;

        tracing::debug!(map_id = %map.id, "Saved map");
        Ok(())
    }
}

/// Decode a document into its summary.
async fn read_summary(path: &Path, id: &str) -> Result<MapSummary, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    let stored: StoredSummary =
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    if stored.id != id {
        return Err(StoreError::KeyMismatch {
            path: path.to_path_buf(),
            found: stored.id,
        });
    }
    Ok(MapSummary {
        id: stored.id,
        name: stored.name,
        image_path: stored.image_path,
        annotation_count: stored.annotations.len(),
    })
}
