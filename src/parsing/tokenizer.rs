use std::borrow::Cow;

use crate::parsing::error::{LexError, LexErrorKind};
use crate::parsing::options::EscapeMode;
use crate::parsing::{escapes, find_unescaped, number, skip_whitespaces};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LCurlyBracket,
    RCurlyBracket,
    LSquareBracket,
    RSquareBracket,
    Colon,
    Comma,
    String,
    Number,
    True,
    False,
    Null,
    Eof,
}

/// A single lexical unit.
///
/// For strings the lexeme is the content between the quotes, as produced by the active
/// [`EscapeMode`]. For every other kind it is the matched source text, empty for
/// [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    kind: TokenKind,
    lexeme: Cow<'a, str>,
    start: usize,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, lexeme: impl Into<Cow<'a, str>>, start: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            start,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Byte offset of the first character of the token. For strings this is the opening quote.
    pub fn start(&self) -> usize {
        self.start
    }

    // the parser owns the tokens, it moves string lexemes into the tree instead of copying them
    pub(super) fn take_lexeme(&mut self) -> Cow<'a, str> {
        std::mem::take(&mut self.lexeme)
    }
}

pub(crate) struct Tokenizer<'a> {
    json: &'a str,
    buffer: &'a [u8],
    pos: usize,
    escapes: EscapeMode,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(json: &'a str) -> Self {
        Self {
            json,
            buffer: json.as_bytes(),
            pos: 0,
            escapes: EscapeMode::default(),
        }
    }

    pub(crate) fn escapes(mut self, mode: EscapeMode) -> Self {
        self.escapes = mode;
        self
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();
        let len = self.buffer.len();

        loop {
            skip_whitespaces(self.buffer, &mut self.pos);
            if self.pos >= len {
                break;
            }

            let start = self.pos;
            let token = match self.buffer[start] {
                b'{' => self.punctuation(TokenKind::LCurlyBracket),
                b'}' => self.punctuation(TokenKind::RCurlyBracket),
                b'[' => self.punctuation(TokenKind::LSquareBracket),
                b']' => self.punctuation(TokenKind::RSquareBracket),
                b':' => self.punctuation(TokenKind::Colon),
                b',' => self.punctuation(TokenKind::Comma),
                b'"' => self.read_string()?,
                b'-' | b'0'..=b'9' => {
                    self.pos = number::scan(self.buffer, start)?;
                    Token::new(TokenKind::Number, &self.json[start..self.pos], start)
                }
                b't' => self.read_keyword("true", TokenKind::True)?,
                b'f' => self.read_keyword("false", TokenKind::False)?,
                b'n' => self.read_keyword("null", TokenKind::Null)?,
                _ => return Err(self.unexpected_character()),
            };
            tokens.push(token);
        }
        tokens.push(Token::new(TokenKind::Eof, "", len));

        Ok(tokens)
    }

    fn punctuation(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        Token::new(kind, &self.json[start..self.pos], start)
    }

    fn read_string(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.pos;
        // the content starts right after the opening quote
        let content_start = start + 1;
        let Some(end) = find_unescaped(&self.buffer[content_start..], b'"') else {
            return Err(LexError::new(LexErrorKind::UnterminatedString, start));
        };

        // the needle and '\' are both ascii, so both ends are char boundaries
        let raw = &self.json[content_start..content_start + end];
        let lexeme = match self.escapes {
            EscapeMode::Raw => Cow::Borrowed(raw),
            EscapeMode::StripBackslash => escapes::strip(raw),
            EscapeMode::Decode => escapes::decode(raw, content_start)?,
        };
        self.pos = content_start + end + 1;

        Ok(Token::new(TokenKind::String, lexeme, start))
    }

    // "tru" "nul" "fals" and "trUe" are all rejected at the first character of the word
    fn read_keyword(&mut self, keyword: &'static str, kind: TokenKind) -> Result<Token<'a>, LexError> {
        if !self.buffer[self.pos..].starts_with(keyword.as_bytes()) {
            return Err(self.unexpected_character());
        }
        let start = self.pos;
        self.pos += keyword.len();

        Ok(Token::new(kind, keyword, start))
    }

    fn unexpected_character(&self) -> LexError {
        // pos is always on a char boundary: every token we consumed ends on an ascii byte
        let ch = self.json[self.pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        LexError::new(LexErrorKind::UnexpectedCharacter { ch }, self.pos)
    }
}
