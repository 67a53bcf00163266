/// Constructs a [Value](crate::Value) from a literal.
///
/// # Example
///
/// ```
/// # use strict_json::json;
/// #
/// let val = json!({
///     "name": "Alice",
///     "age": 25,
///     "hobbies": ["reading", "hiking"],
///     "offset": (-1.5)
/// });
///
/// assert_eq!(val.get("age").and_then(|v| v.as_f64()), Some(25.0));
/// ```
///
/// Meant for building test data and expected trees. Keys and strings are taken as they are, no
/// escape handling and no duplicate key check: a repeated key keeps its first position and the
/// last value. Negative numbers and other multi-token expressions need parentheses.
#[macro_export]
macro_rules! json {
    ([]) => { $crate::Value::Array(Vec::new()) };
    ({}) => { $crate::Value::Object($crate::Map::new()) };
    (null) => { $crate::Value::Null };
    (true) => { $crate::Value::Bool(true) };
    (false) => { $crate::Value::Bool(false) };
    ([ $($elem:tt),+ $(,)? ]) => { $crate::Value::Array(vec![$($crate::json!($elem)),+]) };
    ({ $($key:tt: $val:tt),+ $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(map.insert(String::from($key), $crate::json!($val));)+
        $crate::Value::Object(map)
    }};
    // &str, String or some numeric type
    ($other:expr) => { $crate::Value::from($other) };
}
