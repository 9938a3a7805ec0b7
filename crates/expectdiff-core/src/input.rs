//! Parse boundary for comparison inputs.
//!
//! Raw text becomes a `serde_json::Value` here or an explicit `InvalidJson`
//! error. Blank or malformed input is never turned into an empty object.

use crate::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Number of input chars quoted in an `InvalidJson` message
const ERROR_SNIPPET_CHARS: usize = 100;

/// Which side of a comparison a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Actual,
    Expected,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Actual => "actual",
            Side::Expected => "expected",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse one side of a comparison.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// `InvalidJson` when the trimmed text is empty or not valid JSON. The
/// message quotes the first 100 chars of the input.
pub fn parse_json_input(side: Side, text: &str) -> Result<Value, ExError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid_json(side, "input is empty", trimmed));
    }
    serde_json::from_str(trimmed).map_err(|e| invalid_json(side, &e.to_string(), trimmed))
}

/// Parse one side of a comparison from raw bytes.
///
/// # Errors
///
/// `InvalidJson` when the bytes are not UTF-8, or per [`parse_json_input`].
pub fn parse_json_bytes(side: Side, bytes: &[u8]) -> Result<Value, ExError> {
    parse_json_input(side, decode_utf8(side, bytes)?)
}

/// Decode one side's raw bytes.
///
/// # Errors
///
/// `InvalidJson` when the bytes are not UTF-8.
pub fn decode_utf8(side: Side, bytes: &[u8]) -> Result<&str, ExError> {
    std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::InvalidJson)
            .with_op("parse_json_bytes")
            .with_side(side.as_str())
            .with_message(format!("input is not valid UTF-8: {}", e))
    })
}

fn invalid_json(side: Side, reason: &str, text: &str) -> ExError {
    let mut quoted: String = text.chars().take(ERROR_SNIPPET_CHARS).collect();
    if text.chars().count() > ERROR_SNIPPET_CHARS {
        quoted.push_str("...");
    }
    ExError::new(ExErrorKind::InvalidJson)
        .with_op("parse_json_input")
        .with_side(side.as_str())
        .with_message(format!("{} (input: {:?})", reason, quoted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_with_surrounding_whitespace() {
        let v = parse_json_input(Side::Actual, "  {\"a\": 1}\n").unwrap();
        assert_eq!(v, json!({"a": 1}));
    }

    #[test]
    fn test_empty_input_is_invalid_not_empty_object() {
        let err = parse_json_input(Side::Expected, "   ").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidJson);
        assert_eq!(err.side(), Some("expected"));
    }

    #[test]
    fn test_malformed_input_quotes_bounded_snippet() {
        let text = format!("{{\"a\": {}", "1".repeat(300));
        let err = parse_json_input(Side::Actual, &text).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidJson);
        assert!(err.message().contains("..."));
        assert!(err.message().len() < 300);
    }

    #[test]
    fn test_invalid_utf8_is_invalid_json() {
        let err = parse_json_bytes(Side::Actual, &[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidJson);
        assert_eq!(err.op(), Some("parse_json_bytes"));
    }

    #[test]
    fn test_scalars_are_valid_documents() {
        assert_eq!(parse_json_input(Side::Actual, "null").unwrap(), json!(null));
        assert_eq!(parse_json_input(Side::Actual, "\"1\"").unwrap(), json!("1"));
    }
}
