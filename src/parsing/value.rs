use indexmap::IndexMap;

pub(crate) mod de;
pub(crate) mod error;
mod from;

/// Object storage. Iteration follows the order the keys appeared in the input.
pub type Map = IndexMap<String, Value>;

/// A parsed JSON document.
///
/// A `Value` owns all of its text, it never borrows from the input it was parsed from. Objects
/// produced by the parser never contain the same key twice.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(vec) => Some(vec),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(vec) => Some(vec),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key of an object. Returns `None` for any other variant.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an element of an array. Returns `None` for any other variant.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|vec| vec.get(index))
    }

    /// Replaces the value with `Null` and returns what was there.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn accessors_match_the_variant() {
        let values = vec![
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(1.5), "number"),
            (json!("text"), "string"),
            (json!([1]), "array"),
            (json!({"a": 1}), "object"),
        ];

        for (value, name) in values {
            assert_eq!(value.type_name(), name);
            assert_eq!(value.is_null(), name == "null");
            assert_eq!(value.is_bool(), name == "boolean");
            assert_eq!(value.is_number(), name == "number");
            assert_eq!(value.is_string(), name == "string");
            assert_eq!(value.is_array(), name == "array");
            assert_eq!(value.is_object(), name == "object");
        }
    }

    #[test]
    fn lookups() {
        let value = json!({"name": "Alice", "tags": ["a", "b"], "ok": true});

        assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
        assert_eq!(value.get("ok").and_then(Value::as_bool), Some(true));
        assert_eq!(
            value.get("tags").and_then(|tags| tags.get_index(1)),
            Some(&json!("b"))
        );
        assert_eq!(value.get("missing"), None);
        // wrong variant
        assert_eq!(value.get_index(0), None);
        assert_eq!(json!([1]).get("0"), None);
    }

    #[test]
    fn take_leaves_null() {
        let mut value = json!({"a": [1, 2]});
        let array = value.as_object_mut().and_then(|map| map.get_mut("a")).map(Value::take);

        assert_eq!(array, Some(json!([1, 2])));
        assert_eq!(value, json!({"a": null}));
    }
}
