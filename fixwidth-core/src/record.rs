//! Decoded record container

use crate::types::Value;
use core::fmt;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered field-name → value mapping tagged with its record type
///
/// Insertion order is schema field order. Putting an existing name replaces
/// the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    record_type: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record of the given type
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field, overwriting any existing value under the same name
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Chaining form of [`put`](Self::put) for fixtures
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(name, value);
        self
    }

    /// Name of the record type that produced this record
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Raw value of a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Check whether a field was populated (a Null value still counts)
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field as text; empty string when absent or Null
    pub fn as_string(&self, name: &str) -> String {
        self.get(name).map(Value::to_field_text).unwrap_or_default()
    }

    /// Field as an integer; 0 when absent or not an integer
    pub fn as_int(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(Value::Integer(i)) => *i,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Field as a double; 0.0 when absent or not numeric
    pub fn as_double(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(Value::Decimal(d)) => *d,
            Some(Value::Integer(i)) => *i as f64,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Field as a boolean; text counts only when it reads "true" (any case)
    pub fn as_bool(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Boolean(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Read-only view of all fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of populated fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check for a record with no populated fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Record Type: {}", self.record_type)?;
        for (name, value) in &self.fields {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Serializes as a flat object of field values, in field order
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("record_1")
            .with("id", 1i64)
            .with("name", "John")
            .with("amount", 1234.5678)
            .with("active", true)
            .with("missing", Value::Null)
    }

    #[test]
    fn test_serializes_as_flat_ordered_object() {
        let record = Record::new("record_1")
            .with("name", "John")
            .with("id", 1i64)
            .with("amount", 12.5)
            .with("active", false)
            .with("missing", Value::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"John","id":1,"amount":12.5,"active":false,"missing":null}"#
        );

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.is_object());
        assert!(value["missing"].is_null());
        assert!(value.get("record_type").is_none());
    }

    #[test]
    fn test_typed_accessors() {
        let record = sample();
        assert_eq!(record.as_int("id"), 1);
        assert_eq!(record.as_string("name"), "John");
        assert_eq!(record.as_double("amount"), 1234.5678);
        assert_eq!(record.as_double("id"), 1.0);
        assert!(record.as_bool("active"));
    }

    #[test]
    fn test_accessor_fallbacks() {
        let record = sample();
        assert_eq!(record.as_string("nope"), "");
        assert_eq!(record.as_int("nope"), 0);
        assert_eq!(record.as_int("name"), 0);
        assert_eq!(record.as_double("missing"), 0.0);
        assert!(!record.as_bool("name"));
        assert_eq!(record.as_string("missing"), "");
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut record = sample();
        record.put("id", 9i64);

        assert_eq!(record.len(), 5);
        assert_eq!(record.field_names()[0], "id");
        assert_eq!(record.as_int("id"), 9);
        assert!(record.has("missing"));
        assert!(!record.has("other"));
    }

    #[test]
    fn test_display_lists_fields() {
        let text = sample().to_string();
        assert!(text.starts_with("Record Type: record_1\n"));
        assert!(text.contains("id: 1\n"));
        assert!(text.contains("missing: null\n"));
    }

    #[test]
    fn test_empty_record() {
        let record = Record::new("r");
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert_eq!(record.record_type(), "r");
    }
}
