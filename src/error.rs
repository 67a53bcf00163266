use thiserror::Error;

use crate::parsing::error::ParseError;
use crate::parsing::value::error::BindError;

/// Returned by [`parse_into`](crate::parse_into), which can fail in either stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::error::ParseErrorKind;

    #[test]
    fn displays_the_inner_error() {
        let err = Error::from(ParseError::new(ParseErrorKind::TrailingComma, 3));
        assert_eq!(err.to_string(), "trailing comma at index 3");
    }
}
