use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;

/// Field carrying a document's identifier.
pub const ID_FIELD: &str = "_id";

/// An opaque document body.
///
/// Top-level and embedded documents share this representation: a JSON object
/// whose fields the storage engine never inspects, apart from [`ID_FIELD`]
/// and the embedded reference field named by the pack's key scheme. Field
/// order is preserved across a store round-trip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, TypeError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TypeError::NotAnObject(value_kind(&other))),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, TypeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// Serialize to compact JSON text.
    pub fn to_json(&self) -> Result<String, TypeError> {
        serde_json::to_string(&self.0).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// The document identifier, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Document {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_from_object() {
        let doc = Document::from_value(json!({"_id": "abc", "name": "Sword"})).unwrap();
        assert_eq!(doc.id(), Some("abc"));
        assert_eq!(doc.get("name"), Some(&json!("Sword")));
    }

    #[test]
    fn non_string_id_is_absent() {
        let doc = Document::from_value(json!({"_id": 7})).unwrap();
        assert_eq!(doc.id(), None);
    }

    #[test]
    fn rejects_non_objects() {
        let err = Document::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, TypeError::NotAnObject("array"));
    }

    #[test]
    fn json_text_preserves_field_order() {
        let text = r#"{"_id":"a","zeta":1,"alpha":{"b":2,"a":1}}"#;
        let doc = Document::from_json(text).unwrap();
        assert_eq!(doc.to_json().unwrap(), text);
    }

    #[test]
    fn insert_replaces_field() {
        let mut doc = Document::new();
        assert!(doc.insert("items", json!([])).is_none());
        let prev = doc.insert("items", json!(["a"]));
        assert_eq!(prev, Some(json!([])));
        assert_eq!(doc.get("items"), Some(&json!(["a"])));
    }
}
