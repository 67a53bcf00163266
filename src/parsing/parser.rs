use std::borrow::Cow;

use crate::parsing::error::{ParseError, ParseErrorKind};
use crate::parsing::number;
use crate::parsing::options::ParserOptions;
use crate::parsing::tokenizer::{Token, TokenKind};
use crate::parsing::value::{Map, Value};

enum Action {
    Continue,
    Break,
}

// Recursive descent over the complete token sequence. The tokens always end with an Eof token;
// reading past the end behaves as if it was repeated, so every rule sees Eof instead of panicking.
pub(super) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
    max_depth: Option<usize>,
    // error position for Eof
    end: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(tokens: Vec<Token<'a>>, options: &ParserOptions) -> Self {
        let end = tokens.last().map_or(0, Token::start);
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            end,
        }
    }

    // JSON-text = ws value ws, where value is restricted to an object or an array
    pub(super) fn parse(mut self) -> Result<Value, ParseError> {
        let value = match self.peek_kind() {
            TokenKind::LCurlyBracket | TokenKind::LSquareBracket => self.parse_value()?,
            // [] or [\n, \t, '\r', ' ']
            TokenKind::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
            _ => return Err(self.error(ParseErrorKind::InvalidRoot)),
        };

        // {"a": 1}} or [1] [2]
        if self.peek_kind() != TokenKind::Eof {
            return Err(self.error(ParseErrorKind::TrailingData));
        }

        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek_kind() {
            TokenKind::LCurlyBracket => self.parse_object().map(Value::Object),
            TokenKind::LSquareBracket => self.parse_array().map(Value::Array),
            TokenKind::String => Ok(Value::String(self.next_lexeme().into_owned())),
            TokenKind::Number => self.parse_number(),
            TokenKind::True => {
                self.advance();
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Bool(false))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnexpectedEof)),
            // [,1] {"a": :} [}
            TokenKind::RCurlyBracket
            | TokenKind::RSquareBracket
            | TokenKind::Colon
            | TokenKind::Comma => Err(self.error(ParseErrorKind::InvalidValue)),
        }
    }

    // After moving past the opening '{'
    //
    // 1. '}' right away is the empty object
    // 2. a non-empty string key that is not already in the map, then ':'
    // 3. a json value
    // 4. ',' -> back to 2, or '}' -> done
    //
    // Duplicate keys are only checked within the same object, {"key": {"key": {}}} is allowed.
    fn parse_object(&mut self) -> Result<Map, ParseError> {
        self.enter()?;
        let mut map = Map::new();

        // {}
        if self.peek_kind() == TokenKind::RCurlyBracket {
            self.advance();
            self.depth -= 1;
            return Ok(map);
        }

        loop {
            let start = self.current_start();
            match self.peek_kind() {
                TokenKind::String => (),
                TokenKind::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                // {1: true} {null: 1}
                _ => return Err(self.error(ParseErrorKind::NonStringKey)),
            }

            let key = self.next_lexeme().into_owned();
            if key.is_empty() {
                return Err(ParseError::new(ParseErrorKind::EmptyKey, start));
            }
            if map.contains_key(&key) {
                return Err(ParseError::new(ParseErrorKind::DuplicateKey { key }, start));
            }

            self.expect_colon()?;
            let value = self.parse_value()?;
            map.insert(key, value);

            match self.expect_comma_or_end(TokenKind::RCurlyBracket, ParseErrorKind::ExpectedCloseBrace)? {
                Action::Continue => (),
                Action::Break => break,
            }
        }
        self.depth -= 1;

        Ok(map)
    }

    // Mirrors parse_object() without keys
    fn parse_array(&mut self) -> Result<Vec<Value>, ParseError> {
        self.enter()?;
        let mut values = Vec::new();

        // []
        if self.peek_kind() == TokenKind::RSquareBracket {
            self.advance();
            self.depth -= 1;
            return Ok(values);
        }

        loop {
            values.push(self.parse_value()?);

            match self.expect_comma_or_end(TokenKind::RSquareBracket, ParseErrorKind::ExpectedCloseBracket)? {
                Action::Continue => (),
                Action::Break => break,
            }
        }
        self.depth -= 1;

        Ok(values)
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.current_start();
        let lexeme = self.next_lexeme();

        match number::to_f64(&lexeme) {
            Some(n) => Ok(Value::Number(n)),
            None => Err(ParseError::new(
                ParseErrorKind::InvalidNumber { lexeme: lexeme.into_owned() },
                start,
            )),
        }
    }

    // Moves past an opening bracket, every level of nesting is a recursive call
    fn enter(&mut self) -> Result<(), ParseError> {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(self.error(ParseErrorKind::NestingTooDeep { limit }));
            }
        }
        self.depth += 1;
        self.advance();

        Ok(())
    }

    fn expect_colon(&mut self) -> Result<(), ParseError> {
        match self.peek_kind() {
            TokenKind::Colon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnexpectedEof)),
            _ => Err(self.error(ParseErrorKind::ExpectedColon)),
        }
    }

    // `mismatch` is reported when the token after a value is neither ',' nor `end`
    fn expect_comma_or_end(&mut self, end: TokenKind, mismatch: ParseErrorKind) -> Result<Action, ParseError> {
        match self.peek_kind() {
            TokenKind::Comma => {
                self.advance();
                // {"a": 1,} [1,]
                if self.peek_kind() == end {
                    return Err(self.error(ParseErrorKind::TrailingComma));
                }
                Ok(Action::Continue)
            }
            kind if kind == end => {
                self.advance();
                Ok(Action::Break)
            }
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnexpectedEof)),
            _ => Err(self.error(mismatch)),
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens.get(self.pos).map_or(TokenKind::Eof, Token::kind)
    }

    fn current_start(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, Token::start)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    // consumes the current token and moves its lexeme out
    fn next_lexeme(&mut self) -> Cow<'a, str> {
        let lexeme = self
            .tokens
            .get_mut(self.pos)
            .map(Token::take_lexeme)
            .unwrap_or_default();
        self.advance();
        lexeme
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current_start())
    }
}
