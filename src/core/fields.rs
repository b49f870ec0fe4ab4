//! Structured key-value fields attached to a record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arrays and objects, kept as JSON
    Nested(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Nested(v) => write!(f, "{}", v),
        }
    }
}

impl FieldValue {
    /// Convert to a JSON value; nested structures become their JSON string
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::UInt(u) => Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Null => Value::Null,
            FieldValue::Nested(v) => Value::String(v.to_string()),
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, FieldValue::Nested(_))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::UInt(u64::from(u))
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::String(s) => FieldValue::String(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null)
                }
            }
            nested => FieldValue::Nested(nested),
        }
    }
}

/// Insertion-ordered key-value fields of a record
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a field (builder form)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field, replacing the value of an existing key
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.add_field(key, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_keep_insertion_order() {
        let fields = Fields::new()
            .with_field("zeta", 1)
            .with_field("alpha", "a")
            .with_field("mid", true);

        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let fields = Fields::new()
            .with_field("a", 1)
            .with_field("b", 2)
            .with_field("a", 3);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a"), Some(&FieldValue::Int(3)));
        assert_eq!(fields.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(FieldValue::from(json!(42)), FieldValue::Int(42));
        assert_eq!(FieldValue::from(json!("x")), FieldValue::String("x".into()));
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Null);
        assert!(!FieldValue::from(json!({"k": [1, 2]})).is_primitive());
    }

    #[test]
    fn test_nested_value_is_stringified_for_json() {
        let value = FieldValue::from(json!({"k": 1}));
        assert_eq!(value.to_json_value(), json!("{\"k\":1}"));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from("Tommy").to_string(), "Tommy");
        assert_eq!(FieldValue::from(42).to_string(), "42");
        assert_eq!(FieldValue::from(None::<i32>).to_string(), "null");
        assert_eq!(FieldValue::from(json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn test_from_iterator() {
        let fields: Fields = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(fields.len(), 2);
    }
}
