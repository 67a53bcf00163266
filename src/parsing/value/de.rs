use std::fmt;

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    Unexpected, VariantAccess, Visitor,
};
use serde::{forward_to_deserialize_any, Deserialize, Deserializer};

use crate::parsing::value::error::{BindError, BindErrorKind};
use crate::parsing::value::{Map, Value};

// Integers up to 2^53 are exact in an f64, above that a number is handed over as a float
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Maps a [`Value`] onto any type that implements [`Deserialize`].
///
/// Field names come from `#[derive(Deserialize)]`, so `#[serde(rename = "...")]` declares the
/// name a field is read from. Numbers bind to integer fields only when they are integral and in
/// range for the target, `null` binds to `None` and `()`.
///
/// ```
/// use serde::Deserialize;
/// use strict_json::json;
///
/// #[derive(Deserialize)]
/// struct Person {
///     name: String,
///     #[serde(rename = "isStudent")]
///     is_student: bool,
///     hobbies: Vec<String>,
/// }
///
/// let value = json!({"name": "Alice", "isStudent": false, "hobbies": ["reading"]});
/// let person: Person = strict_json::from_value(value).unwrap();
///
/// assert_eq!(person.name, "Alice");
/// assert!(!person.is_student);
/// assert_eq!(person.hobbies, vec!["reading"]);
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, BindError> {
    tracing::trace!(target_type = std::any::type_name::<T>(), from = value.type_name(), "binding value");
    T::deserialize(value)
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($t:ty)),+ $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
                match self {
                    Value::Number(n) => visitor.$visit(to_integer::<$t>(n, stringify!($t))?),
                    other => Err(other.invalid_type(&visitor)),
                }
            }
        )+
    };
}

impl<'de> Deserializer<'de> for Value {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visit_number(n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(vec) => visit_array(vec, visitor),
            Value::Object(map) => visit_object(map, visitor),
        }
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        match self {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(value),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    // "Red" for a unit variant, {"Rgb": [0, 0, 0]} for a variant with data
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        match self {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Object(map) => {
                let len = map.len();
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer { variant, value })
                    }
                    _ => Err(de::Error::invalid_length(len, &"an object with a single key")),
                }
            }
            other => Err(other.invalid_type(&"a string or an object")),
        }
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl Value {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Number(n) => Unexpected::Float(*n),
            Value::String(s) => Unexpected::Str(s),
            Value::Array(_) => Unexpected::Seq,
            Value::Object(_) => Unexpected::Map,
        }
    }

    fn invalid_type(&self, exp: &dyn de::Expected) -> BindError {
        de::Error::invalid_type(self.unexpected(), exp)
    }
}

fn visit_number<'de, V: Visitor<'de>>(n: f64, visitor: V) -> Result<V::Value, BindError> {
    // -0.0 stays a float so the sign survives a round trip through a Value field
    let is_integer = n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !(n == 0.0 && n.is_sign_negative());
    match (is_integer, n >= 0.0) {
        (true, true) => visitor.visit_u64(n as u64),
        (true, false) => visitor.visit_i64(n as i64),
        (false, _) => visitor.visit_f64(n),
    }
}

// casts saturate, a number too large for i128 saturates to a value no 64-bit target accepts
fn to_integer<T: TryFrom<i128>>(n: f64, target: &'static str) -> Result<T, BindError> {
    let error = || BindError::new(BindErrorKind::UnconvertibleNumber { number: n, target });

    if !n.is_finite() || n.fract() != 0.0 {
        return Err(error());
    }
    T::try_from(n as i128).map_err(|_| error())
}

fn visit_array<'de, V: Visitor<'de>>(vec: Vec<Value>, visitor: V) -> Result<V::Value, BindError> {
    let len = vec.len();
    let mut access = ArrayAccess::new(vec);
    let value = visitor.visit_seq(&mut access)?;

    // [1, 2, 3] into a (i32, i32) stops reading after two elements
    if access.iter.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

fn visit_object<'de, V: Visitor<'de>>(map: Map, visitor: V) -> Result<V::Value, BindError> {
    let len = map.len();
    let mut access = ObjectAccess::new(map);
    let value = visitor.visit_map(&mut access)?;

    if access.iter.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in object"))
    }
}

struct ArrayAccess {
    iter: std::vec::IntoIter<Value>,
    index: usize,
}

impl ArrayAccess {
    fn new(vec: Vec<Value>) -> Self {
        Self {
            iter: vec.into_iter(),
            index: 0,
        }
    }
}

impl<'de> SeqAccess<'de> for ArrayAccess {
    type Error = BindError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>, BindError> {
        let Some(value) = self.iter.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;

        seed.deserialize(value)
            .map(Some)
            .map_err(|err| err.at_index(index))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct ObjectAccess {
    iter: indexmap::map::IntoIter<String, Value>,
    // the entry whose key was handed out and whose value wasn't yet
    pending: Option<(String, Value)>,
}

impl ObjectAccess {
    fn new(map: Map) -> Self {
        Self {
            iter: map.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for ObjectAccess {
    type Error = BindError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, BindError> {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };

        let result = seed
            .deserialize(key.as_str().into_deserializer())
            .map_err(|err: BindError| err.at_key(&key));
        self.pending = Some((key, value));

        result.map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, BindError> {
        match self.pending.take() {
            Some((key, value)) => seed.deserialize(value).map_err(|err| err.at_key(&key)),
            None => Err(de::Error::custom("value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = BindError;
    type Variant = VariantDeserializer;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, VariantDeserializer), BindError> {
        let variant = self.variant;
        let tag = seed
            .deserialize(variant.as_str().into_deserializer())
            .map_err(|err: BindError| err.at_key(&variant))?;

        Ok((tag, VariantDeserializer { variant, value: self.value }))
    }
}

struct VariantDeserializer {
    variant: String,
    value: Value,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = BindError;

    // {"Red": null}
    fn unit_variant(self) -> Result<(), BindError> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(other.invalid_type(&"unit variant").at_key(&self.variant)),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, BindError> {
        let variant = self.variant;
        seed.deserialize(self.value).map_err(|err| err.at_key(&variant))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, BindError> {
        let result = match self.value {
            Value::Array(vec) => visit_array(vec, visitor),
            other => Err(other.invalid_type(&"tuple variant")),
        };
        result.map_err(|err| err.at_key(&self.variant))
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        let result = match self.value {
            Value::Object(map) => visit_object(map, visitor),
            other => Err(other.invalid_type(&"struct variant")),
        };
        result.map_err(|err| err.at_key(&self.variant))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(n as f64))
    }

    fn visit_f64<E>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Number(n))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(elem) = seq.next_element()? {
            vec.push(elem);
        }
        Ok(Value::Array(vec))
    }

    // the same rule as the parser, a key can't appear twice in one object
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate object key {key:?}")));
            }
            let value = access.next_value()?;
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}
