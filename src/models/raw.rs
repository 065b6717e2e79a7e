use serde_json::{Map, Value};

use super::SourceCollection;

/// Unvalidated document as returned by a source connector
///
/// Field names and types vary between collections and between documents of
/// the same collection. Only the normalizer should read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub origin: SourceCollection,
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(origin: SourceCollection, fields: Map<String, Value>) -> Self {
        Self { origin, fields }
    }

    /// Wrap an arbitrary JSON value. Non-object documents become empty records.
    pub fn from_value(origin: SourceCollection, value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(origin, fields),
            _ => Self::new(origin, Map::new()),
        }
    }

    /// Field value, treating JSON `null` the same as a missing key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty text stored under `key`. Numbers and booleans are rendered.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// First non-empty text among `keys`, in order.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// First value among `keys` that `f` accepts, in order.
    pub fn first_map<T, F>(&self, keys: &[&str], mut f: F) -> Option<T>
    where
        F: FnMut(&Value) -> Option<T>,
    {
        keys.iter().find_map(|key| self.get(key).and_then(&mut f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_blank_fields_are_absent() {
        let raw = RawRecord::from_value(
            SourceCollection::Primary,
            json!({"location": null, "address": "  ", "area": "Marina"}),
        );
        assert!(raw.get("location").is_none());
        assert!(raw.text("address").is_none());
        assert_eq!(
            raw.first_text(&["location", "address", "area"]).as_deref(),
            Some("Marina")
        );
    }

    #[test]
    fn first_map_skips_values_the_mapper_rejects() {
        let raw = RawRecord::from_value(
            SourceCollection::Primary,
            json!({"a": "x", "b": 7, "c": 9}),
        );
        assert_eq!(raw.first_map(&["a", "b", "c"], |v| v.as_i64()), Some(7));
        assert_eq!(raw.first_map(&["a", "missing"], |v| v.as_i64()), None);
    }

    #[test]
    fn non_object_documents_are_empty() {
        let raw = RawRecord::from_value(SourceCollection::Submitted, json!([1, 2, 3]));
        assert!(raw.fields.is_empty());
        assert_eq!(raw.origin, SourceCollection::Submitted);
    }
}
