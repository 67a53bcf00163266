use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
    #[error("leading zeros are not allowed")]
    LeadingZero,
    #[error("malformed number, {message}")]
    MalformedNumber { message: &'static str },
    #[error("unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char },
    // only reported when escape sequences are decoded
    #[error("unknown escape sequence '\\{ch}'")]
    UnknownEscape { ch: char },
    #[error("invalid unicode escape, {message}")]
    InvalidUnicodeEscape { message: &'static str },
    #[error("invalid utf-8 sequence")]
    InvalidUtf8,
}

/// An error produced while splitting the input into tokens.
///
/// `pos` is the byte offset into the input where the offending token starts, or where the
/// scan stopped for errors inside a token (a bad exponent, an unknown escape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at index {pos}")]
pub struct LexError {
    pub(crate) kind: LexErrorKind,
    pub(crate) pos: usize,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    pub fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lexical(LexErrorKind),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected colon ':' after object key")]
    ExpectedColon,
    #[error("expected ',' or '}}'")]
    ExpectedCloseBrace,
    #[error("expected ',' or ']'")]
    ExpectedCloseBracket,
    #[error("trailing comma")]
    TrailingComma,
    #[error("duplicate object key {key:?}")]
    DuplicateKey { key: String },
    #[error("empty object key")]
    EmptyKey,
    #[error("object keys must be strings")]
    NonStringKey,
    #[error("expected a json value")]
    InvalidValue,
    #[error("the document root must be an object or an array")]
    InvalidRoot,
    #[error("unexpected data after the document root")]
    TrailingData,
    #[error("number {lexeme} can not be represented as a 64-bit float")]
    InvalidNumber { lexeme: String },
    #[error("nesting depth exceeded limit of {limit}")]
    NestingTooDeep { limit: usize },
    #[error("input size exceeded limit of {limit} bytes")]
    InputTooLarge { limit: usize },
}

/// Represents an error that can occur while parsing a JSON document.
///
/// Every error is terminal: the parse call that produced it returns no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at index {pos}")]
pub struct ParseError {
    pub(crate) kind: ParseErrorKind,
    pub(crate) pos: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Byte offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns true if the input was rejected by the tokenizer rather than the grammar.
    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lexical(_))
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lexical(err.kind),
            pos: err.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_errors_keep_their_position() {
        let err = ParseError::from(LexError::new(LexErrorKind::LeadingZero, 5));

        assert!(err.is_lexical());
        assert_eq!(err.pos(), 5);
        assert_eq!(err.kind(), &ParseErrorKind::Lexical(LexErrorKind::LeadingZero));
    }

    #[test]
    fn display_includes_the_index() {
        let err = ParseError::new(ParseErrorKind::DuplicateKey { key: "a".to_string() }, 8);
        assert_eq!(err.to_string(), "duplicate object key \"a\" at index 8");

        let err = ParseError::new(ParseErrorKind::ExpectedCloseBrace, 3);
        assert_eq!(err.to_string(), "expected ',' or '}' at index 3");

        let err = LexError::new(
            LexErrorKind::MalformedNumber {
                message: "decimal point must be followed by a digit",
            },
            2,
        );
        assert_eq!(
            err.to_string(),
            "malformed number, decimal point must be followed by a digit at index 2"
        );
    }
}
