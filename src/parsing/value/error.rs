use std::fmt;

use serde::de;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindErrorKind {
    /// The value is not the variant the target expects, an array where a struct was expected.
    #[error("invalid type: {found}, expected {expected}")]
    InvalidType { found: String, expected: String },
    #[error("invalid value: {found}, expected {expected}")]
    InvalidValue { found: String, expected: String },
    #[error("invalid length {len}, expected {expected}")]
    InvalidLength { len: usize, expected: String },
    /// A number with a fractional part, or out of range, for an integer target.
    #[error("number {number} can not be converted to {target}")]
    UnconvertibleNumber { number: f64, target: &'static str },
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },
    #[error("unknown field `{field}`, expected {expected}")]
    UnknownField { field: String, expected: String },
    #[error("unknown variant `{variant}`, expected {expected}")]
    UnknownVariant { variant: String, expected: String },
    #[error("duplicate field `{field}`")]
    DuplicateField { field: &'static str },
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// An error produced while mapping a [`Value`](crate::Value) onto a typed structure.
///
/// The error remembers where in the tree it happened, `hobbies[1].name`.
#[derive(Debug, Clone, PartialEq)]
pub struct BindError {
    kind: BindErrorKind,
    // outermost segment first
    path: Vec<Segment>,
}

impl BindError {
    pub(crate) fn new(kind: BindErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    /// The location of the failing value, empty for the root.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) if path.is_empty() => path.push_str(key),
                Segment::Key(key) => {
                    path.push('.');
                    path.push_str(key);
                }
                Segment::Index(index) => {
                    path.push('[');
                    path.push_str(&index.to_string());
                    path.push(']');
                }
            }
        }
        path
    }

    // errors bubble up from the innermost value, every level prepends its own segment
    pub(crate) fn at_key(mut self, key: &str) -> Self {
        self.path.insert(0, Segment::Key(key.to_string()));
        self
    }

    pub(crate) fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, Segment::Index(index));
        self
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} at {}", self.kind, self.path())
        }
    }
}

impl std::error::Error for BindError {}

impl de::Error for BindError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        BindError::new(BindErrorKind::Custom(msg.to_string()))
    }

    fn invalid_type(unexp: de::Unexpected, exp: &dyn de::Expected) -> Self {
        BindError::new(BindErrorKind::InvalidType {
            found: unexp.to_string(),
            expected: exp.to_string(),
        })
    }

    fn invalid_value(unexp: de::Unexpected, exp: &dyn de::Expected) -> Self {
        BindError::new(BindErrorKind::InvalidValue {
            found: unexp.to_string(),
            expected: exp.to_string(),
        })
    }

    fn invalid_length(len: usize, exp: &dyn de::Expected) -> Self {
        BindError::new(BindErrorKind::InvalidLength {
            len,
            expected: exp.to_string(),
        })
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        BindError::new(BindErrorKind::UnknownVariant {
            variant: variant.to_string(),
            expected: one_of(expected),
        })
    }

    fn unknown_field(field: &str, expected: &'static [&'static str]) -> Self {
        BindError::new(BindErrorKind::UnknownField {
            field: field.to_string(),
            expected: one_of(expected),
        })
    }

    fn missing_field(field: &'static str) -> Self {
        BindError::new(BindErrorKind::MissingField { field })
    }

    fn duplicate_field(field: &'static str) -> Self {
        BindError::new(BindErrorKind::DuplicateField { field })
    }
}

fn one_of(names: &[&str]) -> String {
    match names {
        [] => "nothing".to_string(),
        [name] => format!("`{name}`"),
        _ => {
            let names: Vec<String> = names.iter().map(|name| format!("`{name}`")).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn path_is_built_from_the_inside_out() {
        let err = BindError::missing_field("name").at_key("person").at_index(1).at_key("people");

        assert_eq!(err.path(), "people[1].person");
        assert_eq!(err.to_string(), "missing field `name` at people[1].person");
    }

    #[test]
    fn root_errors_have_no_path() {
        let err = BindError::invalid_type(de::Unexpected::Seq, &"struct Person");

        assert_eq!(err.path(), "");
        assert_eq!(err.to_string(), "invalid type: sequence, expected struct Person");
    }

    #[test]
    fn expected_names() {
        let err = BindError::unknown_variant("Blue", &["Red", "Green"]);
        assert_eq!(
            err.to_string(),
            "unknown variant `Blue`, expected one of `Red`, `Green`"
        );

        let err = BindError::unknown_field("x", &["id"]).at_index(0);
        assert_eq!(err.to_string(), "unknown field `x`, expected `id` at [0]");
    }
}
