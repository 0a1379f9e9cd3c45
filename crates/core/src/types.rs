use uuid::Uuid;

/// Map and annotation ids are UUID v4 strings.
pub type EntityId = String;

/// Generate a fresh entity id.
pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Whether `id` is a canonical (lowercase, hyphenated) UUID string.
///
/// Only canonical ids are ever issued, so anything else cannot name a
/// stored document.
pub fn is_canonical_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok_and(|uuid| uuid.hyphenated().to_string() == id)
}
