use serde::Serialize;
use serde_json::{Map, Value};

/// A single note as written to disk.
///
/// Keys keep the order they had in the page, fields added during enrichment
/// are appended after them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NoteRecord(Map<String, Value>);

impl NoteRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or overwrite a field. An existing key keeps its position.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }

    pub fn title(&self) -> Option<&Value> {
        self.0.get("title")
    }

    pub fn note_id(&self) -> Option<&Value> {
        self.0.get("noteId")
    }

    /// `user.nickname`, the author's display name.
    pub fn nickname(&self) -> Option<&Value> {
        self.0.get("user").and_then(|user| user.get("nickname"))
    }

    pub fn note_url(&self) -> Option<&str> {
        self.0.get("noteUrl").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for NoteRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
