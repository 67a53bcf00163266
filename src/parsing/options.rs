use super::NESTING_DEPTH_LIMIT;

/// How the tokenizer treats a backslash inside a string literal.
///
/// In every mode the character after a backslash never terminates the string, so `"a\"b"` is a
/// single token. The modes only differ in the content handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// The backslash and the character after it are kept as two raw characters. `"a\nb"`
    /// yields the four characters `a`, `\`, `n`, `b`.
    #[default]
    Raw,
    /// The backslash is dropped and the character after it is kept verbatim, without
    /// interpretation. `"a\nb"` yields `anb` and `"C:\\dir"` yields `C:\dir`.
    StripBackslash,
    /// Full decoding of the escape sequences in RFC 8259 section 7, including `\uXXXX` and
    /// surrogate pairs. Unknown or malformed sequences are rejected.
    Decode,
}

/// Limits and behaviour switches for a single parse call.
///
/// ```
/// use strict_json::{EscapeMode, ParserOptions};
///
/// let options = ParserOptions::new()
///     .max_depth(Some(16))
///     .escapes(EscapeMode::Decode);
/// let value = strict_json::from_str_with(r#"["a\tb"]"#, &options).unwrap();
///
/// assert_eq!(value.get_index(0).and_then(|v| v.as_str()), Some("a\tb"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of nested objects/arrays, `None` for no limit. Every nesting level is a
    /// recursive call, so without a limit deeply nested input can exhaust the stack.
    pub max_depth: Option<usize>,
    /// Maximum input size in bytes, `None` for no limit. Unset by default;
    /// [`INPUT_BUFFER_LIMIT`](crate::INPUT_BUFFER_LIMIT) is a reasonable cap for untrusted input.
    pub max_input_len: Option<usize>,
    pub escapes: EscapeMode,
}

impl ParserOptions {
    pub const fn new() -> Self {
        Self {
            max_depth: Some(NESTING_DEPTH_LIMIT),
            max_input_len: None,
            escapes: EscapeMode::Raw,
        }
    }

    /// No depth or size limits.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_input_len: None,
            escapes: EscapeMode::Raw,
        }
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_input_len(mut self, len: Option<usize>) -> Self {
        self.max_input_len = len;
        self
    }

    pub fn escapes(mut self, mode: EscapeMode) -> Self {
        self.escapes = mode;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let options = ParserOptions::default();

        assert_eq!(options.max_depth, Some(NESTING_DEPTH_LIMIT));
        assert_eq!(options.max_input_len, None);
        assert_eq!(options.escapes, EscapeMode::Raw);
    }

    #[test]
    fn size_limit_is_opt_in() {
        let options = ParserOptions::new().max_input_len(Some(crate::INPUT_BUFFER_LIMIT));

        assert_eq!(options.max_input_len, Some(5_242_880));
        assert_eq!(options.max_depth, Some(NESTING_DEPTH_LIMIT));
    }

    #[test]
    fn unbounded_has_no_limits() {
        let options = ParserOptions::unbounded();

        assert_eq!(options.max_depth, None);
        assert_eq!(options.max_input_len, None);
    }

    #[test]
    fn setters_chain() {
        let options = ParserOptions::new()
            .max_depth(Some(2))
            .max_input_len(Some(64))
            .escapes(EscapeMode::StripBackslash);

        assert_eq!(options.max_depth, Some(2));
        assert_eq!(options.max_input_len, Some(64));
        assert_eq!(options.escapes, EscapeMode::StripBackslash);
    }
}
