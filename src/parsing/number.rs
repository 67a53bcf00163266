use crate::parsing::error::{LexError, LexErrorKind};

// Scans a number starting at `start` and returns the index of the first byte after it.
//
//  number = [ minus ] int [ frac ] [ exp ]
//  int    = zero / ( digit1-9 *DIGIT )
//  frac   = decimal-point 1*DIGIT
//  exp    = e [ minus / plus ] 1*DIGIT
//
// https://www.rfc-editor.org/rfc/rfc8259#section-6
//
// Scanning stops at the first byte that can't continue the grammar, whatever it is; 12abc is the
// number 12 followed by an unexpected 'a' that the tokenizer reports on its next iteration.
pub(super) fn scan(buffer: &[u8], start: usize) -> Result<usize, LexError> {
    let mut pos = start;

    if buffer.get(pos) == Some(&b'-') {
        pos += 1;
    }

    match buffer.get(pos) {
        // -0 is valid, 05 and -05 are not
        Some(b'0') => {
            pos += 1;
            if is_digit_at(buffer, pos) {
                return Err(LexError::new(LexErrorKind::LeadingZero, start));
            }
        }
        Some(b) if b.is_ascii_digit() => pos = skip_digits(buffer, pos),
        _ => {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber {
                    message: "a digit (0-9) is required after the minus sign",
                },
                start,
            ));
        }
    }

    if buffer.get(pos) == Some(&b'.') {
        // 1. 1.e5
        if !is_digit_at(buffer, pos + 1) {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber {
                    message: "decimal point must be followed by a digit",
                },
                pos,
            ));
        }
        pos = skip_digits(buffer, pos + 1);
    }

    if matches!(buffer.get(pos), Some(b'e' | b'E')) {
        let marker = pos;
        pos += 1;
        // Leading zeros are allowed on the exponent 1e005 evaluates to 100000
        if matches!(buffer.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        // 1e 1e+ 1E-g
        if !is_digit_at(buffer, pos) {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber {
                    message: "exponential notation must be followed by a digit",
                },
                marker,
            ));
        }
        pos = skip_digits(buffer, pos);
    }

    Ok(pos)
}

// The lexeme already matched the grammar above, which is a subset of what f64::from_str accepts,
// so the only way this fails is a magnitude that overflows to infinity, 1e400
pub(super) fn to_f64(lexeme: &str) -> Option<f64> {
    lexeme.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_digit_at(buffer: &[u8], pos: usize) -> bool {
    buffer.get(pos).is_some_and(|b| b.is_ascii_digit())
}

fn skip_digits(buffer: &[u8], mut pos: usize) -> usize {
    while is_digit_at(buffer, pos) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_numbers() -> Vec<(&'static [u8], usize)> {
        vec![
            (b"0", 1),
            (b"-0", 2),
            (b"123", 3),
            (b"-45", 3),
            (b"123.45", 6),
            (b"1e10", 4),
            (b"1E+2", 4),
            (b"-0.1e-2", 7),
            (b"1e005", 5),
            // the number ends where the grammar stops
            (b"12abc", 2),
            (b"1.5.3", 3),
            (b"7,", 1),
            (b"0]", 1),
        ]
    }

    fn invalid_numbers() -> Vec<(&'static [u8], LexError)> {
        vec![
            (b"01", LexError::new(LexErrorKind::LeadingZero, 0)),
            (b"-01", LexError::new(LexErrorKind::LeadingZero, 0)),
            (b"00", LexError::new(LexErrorKind::LeadingZero, 0)),
            (
                b"-",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "a digit (0-9) is required after the minus sign",
                    },
                    0,
                ),
            ),
            (
                b"-a",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "a digit (0-9) is required after the minus sign",
                    },
                    0,
                ),
            ),
            (
                b"1.",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "decimal point must be followed by a digit",
                    },
                    1,
                ),
            ),
            (
                b"1.e5",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "decimal point must be followed by a digit",
                    },
                    1,
                ),
            ),
            (
                b"1e",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "exponential notation must be followed by a digit",
                    },
                    1,
                ),
            ),
            (
                b"1e+",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "exponential notation must be followed by a digit",
                    },
                    1,
                ),
            ),
            (
                b"246Ef",
                LexError::new(
                    LexErrorKind::MalformedNumber {
                        message: "exponential notation must be followed by a digit",
                    },
                    3,
                ),
            ),
        ]
    }

    #[test]
    fn test_valid_numbers() {
        for (buffer, end) in valid_numbers() {
            assert_eq!(scan(buffer, 0), Ok(end), "failed to scan: {buffer:?}");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for (buffer, error) in invalid_numbers() {
            assert_eq!(scan(buffer, 0), Err(error), "failed to reject: {buffer:?}");
        }
    }

    #[test]
    fn scan_from_an_offset() {
        assert_eq!(scan(b"[10, -2.5]", 5), Ok(9));
    }

    #[test]
    fn conversion() {
        assert_eq!(to_f64("25"), Some(25.0));
        assert_eq!(to_f64("-0.5e1"), Some(-5.0));
        assert_eq!(to_f64("6.02214076e+23"), Some(6.02214076e+23));
        assert_eq!(to_f64("1e400"), None);
        assert_eq!(to_f64("-1e400"), None);
    }
}
