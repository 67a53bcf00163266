//! A strict JSON front end.
//!
//! Text is split into tokens, a recursive descent parser builds a [`Value`] tree out of them and
//! [`from_value`] maps the tree onto any type that implements `serde::Deserialize`.
//!
//! The parser is stricter than RFC 8259 in a few places: the root must be an object or an array,
//! object keys must be unique and non-empty, and nothing but whitespace may follow the root.
//!
//! ```
//! use strict_json::{json, ParseErrorKind};
//!
//! let value = strict_json::from_str(r#"{"a": {"b": {"c": 1}}}"#).unwrap();
//! assert_eq!(value, json!({"a": {"b": {"c": 1}}}));
//!
//! let err = strict_json::from_str(r#"{"a": 1, "a": 2}"#).unwrap_err();
//! assert_eq!(err.kind(), &ParseErrorKind::DuplicateKey { key: "a".to_string() });
//! assert_eq!(err.pos(), 9);
//! ```

use serde::de::DeserializeOwned;

pub use crate::error::Error;
pub use crate::parsing::error::{LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use crate::parsing::options::{EscapeMode, ParserOptions};
pub use crate::parsing::tokenizer::{Token, TokenKind};
pub use crate::parsing::value::de::from_value;
pub use crate::parsing::value::error::{BindError, BindErrorKind};
pub use crate::parsing::value::{Map, Value};
pub use crate::parsing::{INPUT_BUFFER_LIMIT, NESTING_DEPTH_LIMIT};

mod error;
mod macros;
mod parsing;

/// Parses a document with the default [`ParserOptions`].
pub fn from_str(json: &str) -> Result<Value, ParseError> {
    parsing::parse(json, &ParserOptions::new())
}

pub fn from_str_with(json: &str, options: &ParserOptions) -> Result<Value, ParseError> {
    parsing::parse(json, options)
}

/// Parses a document from raw bytes. Invalid UTF-8 is reported as
/// [`LexErrorKind::InvalidUtf8`] at the first invalid byte.
pub fn from_slice(buffer: &[u8]) -> Result<Value, ParseError> {
    parsing::parse_slice(buffer, &ParserOptions::new())
}

pub fn from_slice_with(buffer: &[u8], options: &ParserOptions) -> Result<Value, ParseError> {
    parsing::parse_slice(buffer, options)
}

/// Splits the input into tokens without applying the grammar. The sequence always ends with a
/// [`TokenKind::Eof`] token, even for empty input. String lexemes are left undecoded.
///
/// ```
/// use strict_json::TokenKind;
///
/// let tokens = strict_json::tokenize(r#"{"a": 1}"#).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
///
/// assert_eq!(kinds, vec![
///     TokenKind::LCurlyBracket,
///     TokenKind::String,
///     TokenKind::Colon,
///     TokenKind::Number,
///     TokenKind::RCurlyBracket,
///     TokenKind::Eof,
/// ]);
/// ```
pub fn tokenize(json: &str) -> Result<Vec<Token<'_>>, LexError> {
    parsing::tokenizer::Tokenizer::new(json).tokenize()
}

/// Parses a document and maps it onto `T` in one step.
pub fn parse_into<T: DeserializeOwned>(json: &str) -> Result<T, Error> {
    let value = from_str(json)?;
    Ok(from_value(value)?)
}

pub fn parse_into_with<T: DeserializeOwned>(json: &str, options: &ParserOptions) -> Result<T, Error> {
    let value = from_str_with(json, options)?;
    Ok(from_value(value)?)
}
