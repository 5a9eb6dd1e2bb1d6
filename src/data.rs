//! Plain-text encoding of integer sequences.
//!
//! Sequences are written as space separated decimal integers on one line.
//! The parser is more lenient and accepts any mix of whitespace and commas,
//! so both `1 2 3` and `1,2,3` read back as the same sequence.

use thiserror::Error;

/// Errors surfaced while parsing a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token was not a valid `i32`.
    #[error("invalid integer {token:?} at position {position}")]
    InvalidInteger {
        /// Offending token.
        token: String,
        /// Zero-based token index.
        position: usize,
    },
}

/// Renders a sequence as a single line of space separated integers.
pub fn encode_sequence(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a sequence from text.  Blank input yields an empty sequence.
pub fn parse_sequence(input: &str) -> Result<Vec<i32>, ParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .enumerate()
        .map(|(position, tok)| {
            tok.parse::<i32>().map_err(|_| ParseError::InvalidInteger {
                token: tok.to_string(),
                position,
            })
        })
        .collect()
}
