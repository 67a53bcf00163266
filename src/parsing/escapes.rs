use std::borrow::Cow;

use crate::parsing::error::{LexError, LexErrorKind};

// Both functions take the content of a string literal without the surrounding quotes. The
// tokenizer already guarantees that a '\' is never the last character of the content.

// Drops every escaping backslash and keeps the character after it verbatim: \" -> ", \\ -> \ and
// \n -> n
pub(super) fn strip(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

// https://www.rfc-editor.org/rfc/rfc8259#section-7
//
// `offset` is the position of the first content byte in the input, errors point to the '\' that
// starts the invalid sequence.
pub(super) fn decode(raw: &str, offset: usize) -> Result<Cow<'_, str>, LexError> {
    let bytes = raw.as_bytes();
    let Some(first) = memchr::memchr(b'\\', bytes) else {
        return Ok(Cow::Borrowed(raw));
    };

    let mut out = String::with_capacity(raw.len());
    let mut pos = 0;
    let mut slash = first;
    loop {
        out.push_str(&raw[pos..slash]);
        let Some(escaped) = raw[slash + 1..].chars().next() else {
            return Err(LexError::new(LexErrorKind::UnterminatedString, offset + slash));
        };

        pos = slash + 2;
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let (ch, len) = decode_unicode(bytes, slash, offset)?;
                out.push(ch);
                pos = slash + len;
            }
            ch => return Err(LexError::new(LexErrorKind::UnknownEscape { ch }, offset + slash)),
        }

        match memchr::memchr(b'\\', &bytes[pos..]) {
            Some(p) => slash = pos + p,
            None => break,
        }
    }
    out.push_str(&raw[pos..]);

    Ok(Cow::Owned(out))
}

// Returns the decoded character and the length of the sequence, 6 for \uXXXX and 12 for a
// surrogate pair
fn decode_unicode(bytes: &[u8], slash: usize, offset: usize) -> Result<(char, usize), LexError> {
    let error = |message| {
        LexError::new(
            LexErrorKind::InvalidUnicodeEscape { message },
            offset + slash,
        )
    };

    let code_unit = read_hex(bytes, slash + 2).ok_or_else(|| error("expected 4 hex digits"))?;
    match code_unit {
        0xD800..=0xDBFF => {
            // a high surrogate must be followed by \u and a low surrogate
            let next = slash + 6;
            if bytes.get(next..next + 2) != Some(b"\\u".as_slice()) {
                return Err(error("unpaired high surrogate"));
            }
            let low = read_hex(bytes, next + 2).ok_or_else(|| error("expected 4 hex digits"))?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(error("unpaired high surrogate"));
            }

            let code_point = 0x10000 + ((code_unit - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(code_point)
                .map(|ch| (ch, 12))
                .ok_or_else(|| error("invalid code point"))
        }
        0xDC00..=0xDFFF => Err(error("unpaired low surrogate")),
        _ => char::from_u32(code_unit)
            .map(|ch| (ch, 6))
            .ok_or_else(|| error("invalid code point")),
    }
}

// from_str_radix() accepts a leading '+', "+123" must not pass as a code unit
fn read_hex(bytes: &[u8], start: usize) -> Option<u32> {
    let digits = bytes.get(start..start + 4)?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u32::from_str_radix(std::str::from_utf8(digits).ok()?, 16).ok()
}
