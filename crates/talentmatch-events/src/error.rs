//! Log stream decode error primitives.

use std::fmt::{self, Display, Formatter};

/// Error emitted when a log stream payload cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The frame carried no data after trimming.
    Empty,
    /// The payload was not a JSON object with a known `type`.
    Malformed {
        /// Parser detail suitable for console output.
        detail: String,
    },
}

impl DecodeError {
    /// Parser detail, when one exists.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Malformed { detail } => Some(detail),
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("log payload was empty"),
            Self::Malformed { detail } => write!(formatter, "malformed log payload: {detail}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result wrapper for payload decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_renders_detail() {
        let err = DecodeError::Malformed {
            detail: "expected value at line 1 column 2".to_string(),
        };
        assert_eq!(err.detail(), Some("expected value at line 1 column 2"));
        assert_eq!(
            err.to_string(),
            "malformed log payload: expected value at line 1 column 2"
        );
        assert!(DecodeError::Empty.detail().is_none());
    }
}
