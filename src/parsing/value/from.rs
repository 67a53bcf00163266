use crate::parsing::value::{Map, Value};

// unlike parsed input these are taken as they are, a string is never checked for escapes
impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<Vec<Value>> for Value {
    fn from(val: Vec<Value>) -> Self {
        Value::Array(val)
    }
}

impl From<Map> for Value {
    fn from(val: Map) -> Self {
        Value::Object(val)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Self {
        val.map_or(Value::Null, Into::into)
    }
}

// every number is stored as f64, 64-bit integers above 2^53 lose precision
macro_rules! impl_from_number {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(val: $t) -> Self {
                    Value::Number(val as f64)
                }
            }
        )+
    };
}

impl_from_number!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let values = vec![
            (Value::from("a"), Value::String("a".to_string())),
            (Value::from(String::from("b")), Value::String("b".to_string())),
            (Value::from(false), Value::Bool(false)),
            (Value::from(-3i8), Value::Number(-3.0)),
            (Value::from(7usize), Value::Number(7.0)),
            (Value::from(0.5f32), Value::Number(0.5)),
            (Value::from(None::<i32>), Value::Null),
            (Value::from(Some("x")), Value::String("x".to_string())),
            (Value::from(vec![Value::Null]), Value::Array(vec![Value::Null])),
            (Value::from(Map::new()), Value::Object(Map::new())),
        ];

        for (value, expected) in values {
            assert_eq!(value, expected);
        }
    }
}
