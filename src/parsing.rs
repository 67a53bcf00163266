use crate::parsing::error::{LexError, LexErrorKind, ParseError, ParseErrorKind};
use crate::parsing::options::ParserOptions;
use crate::parsing::parser::Parser;
use crate::parsing::tokenizer::Tokenizer;
use crate::parsing::value::Value;

pub(super) mod error;
mod escapes;
mod number;
pub(super) mod options;
mod parser;
pub(super) mod tokenizer;
pub(super) mod value;

//implementation limits: https://www.ibm.com/docs/en/datapower-gateway/10.6.0?topic=20-json-parser-limits
pub const INPUT_BUFFER_LIMIT: usize = 5_242_880;
pub const NESTING_DEPTH_LIMIT: usize = 128;

pub(super) fn parse(json: &str, options: &ParserOptions) -> Result<Value, ParseError> {
    let span = tracing::debug_span!("parse", len = json.len());
    let _enter = span.enter();

    check_input_len(json.len(), options)?;
    let tokens = Tokenizer::new(json).escapes(options.escapes).tokenize()?;
    tracing::trace!(tokens = tokens.len(), "tokenized input");

    let result = Parser::new(tokens, options).parse();
    if let Err(err) = &result {
        tracing::debug!(error = %err, "rejected input");
    }
    result
}

pub(super) fn parse_slice(buffer: &[u8], options: &ParserOptions) -> Result<Value, ParseError> {
    // checked before validation so oversized input is rejected without scanning it
    check_input_len(buffer.len(), options)?;
    let json = std::str::from_utf8(buffer)
        .map_err(|err| LexError::new(LexErrorKind::InvalidUtf8, err.valid_up_to()))?;
    parse(json, options)
}

// nothing failed at a particular offset, the whole input is rejected
fn check_input_len(len: usize, options: &ParserOptions) -> Result<(), ParseError> {
    match options.max_input_len {
        Some(limit) if len > limit => Err(ParseError::new(ParseErrorKind::InputTooLarge { limit }, 0)),
        _ => Ok(()),
    }
}

fn is_rfc_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r' | b' ')
}

fn skip_whitespaces(buffer: &[u8], pos: &mut usize) {
    while *pos < buffer.len() {
        if is_rfc_whitespace(buffer[*pos]) {
            *pos += 1;
        } else {
            break;
        }
    }
}

// finds the needle while skipping escape sequences
//
// the byte after '\' is never a match, even if it is the needle itself: in "hello\"world" the
// closing quote is the one at the end. A '\' as the very last byte has nothing to escape, the
// needle can't follow it, so we return None.
//
// memchr2() returns the position relative to the slice not the entire haystack, we adjust it
// to get the absolute position
fn find_unescaped(haystack: &[u8], needle: u8) -> Option<usize> {
    let mut pos = 0;
    while pos < haystack.len() {
        match memchr::memchr2(b'\\', needle, &haystack[pos..]) {
            Some(p) if haystack[pos + p] == b'\\' => pos += p + 2,
            Some(p) => return Some(pos + p),
            None => return None,
        }
    }
    None
}
