/// All entity ids are opaque strings (UUID v4 when generated by us).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Loosely typed property bag as stored on a placed component.
pub type PropsBag = serde_json::Map<String, serde_json::Value>;

/// Generate a fresh, globally unique entity id.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
