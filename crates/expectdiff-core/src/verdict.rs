//! Comparison verdicts.
//!
//! A [`Verdict`] is what a consuming surface (console, spreadsheet cell,
//! HTTP response) shows for one comparison. Invalid input is a verdict of
//! its own, distinct from both "no differences" and a difference list.

use crate::diff::engine::diff_values_with;
use crate::diff::format::{format_differences, render_report, FormatOptions};
use crate::diff::model::{DiffOptions, Difference, JsonPath};
use crate::errors::{DiffToolError, ExError};
use crate::input::{decode_utf8, parse_json_input, Side};
use crate::{log_op_end, log_op_start};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Process exit code for a clean comparison
pub const EXIT_MATCH: i32 = 0;
/// Process exit code when differences were found
pub const EXIT_DIFFERENCES: i32 = 1;
/// Process exit code when an input failed to parse
pub const EXIT_INVALID_JSON: i32 = 2;
/// Process exit code for I/O or store failures
pub const EXIT_FAILURE: i32 = 3;

/// Outcome of comparing one actual/expected pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Match,
    Mismatch { differences: Vec<Difference> },
    InvalidJson { side: Side, message: String },
    /// Expected text was blank; there is nothing to compare against
    Skipped { reason: String },
}

impl Verdict {
    /// Build the verdict for a parse failure on one side
    pub fn invalid_json(err: &ExError) -> Self {
        let side = match err.side() {
            Some("expected") => Side::Expected,
            _ => Side::Actual,
        };
        Verdict::InvalidJson {
            side,
            message: err.message().to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Match | Verdict::Skipped { .. } => EXIT_MATCH,
            Verdict::Mismatch { .. } => EXIT_DIFFERENCES,
            Verdict::InvalidJson { .. } => EXIT_INVALID_JSON,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.exit_code() != EXIT_MATCH
    }

    /// Differences carried by the verdict (empty unless `Mismatch`)
    pub fn differences(&self) -> &[Difference] {
        match self {
            Verdict::Mismatch { differences } => differences,
            _ => &[],
        }
    }

    /// Single bounded string for a spreadsheet cell or a web response.
    ///
    /// # Errors
    ///
    /// `FormatLimitTooSmall` when the options cannot hold the marker.
    pub fn cell_text(&self, options: &FormatOptions) -> Result<String, DiffToolError> {
        let text = match self {
            Verdict::Match => "no differences".to_string(),
            Verdict::Skipped { reason } => format!("skipped: {}", reason),
            Verdict::InvalidJson { side, message } => {
                format!("invalid JSON ({}): {}", side, message)
            }
            Verdict::Mismatch { differences } => return format_differences(differences, options),
        };
        if text.chars().count() <= options.max_len {
            return Ok(text);
        }
        // Status lines go through the same bound as difference lists.
        let marker_len = options.truncation_marker.chars().count();
        if options.max_len < marker_len {
            return Err(DiffToolError::FormatLimitTooSmall {
                max_len: options.max_len,
                marker_len,
            });
        }
        let mut cut: String = text.chars().take(options.max_len - marker_len).collect();
        cut.push_str(&options.truncation_marker);
        Ok(cut)
    }

    /// Multi-line listing for terminal output
    pub fn report(&self) -> String {
        match self {
            Verdict::Match => "No differences.\n".to_string(),
            Verdict::Skipped { reason } => format!("Skipped: {}\n", reason),
            Verdict::InvalidJson { side, message } => {
                format!("Invalid JSON in {} input: {}\n", side, message)
            }
            Verdict::Mismatch { differences } => render_report(differences),
        }
    }
}

/// Compare two parsed values.
pub fn compare_values(actual: &Value, expected: &Value, options: &DiffOptions) -> Verdict {
    let differences = diff_values_with(actual, expected, JsonPath::root(), options);
    if differences.is_empty() {
        Verdict::Match
    } else {
        Verdict::Mismatch { differences }
    }
}

/// Compare two raw texts.
///
/// Blank expected text yields `Skipped`. Otherwise both sides are parsed; a
/// failure yields `InvalidJson` (the actual side is reported first).
pub fn compare_texts(actual_text: &str, expected_text: &str, options: &DiffOptions) -> Verdict {
    let start = Instant::now();
    log_op_start!("compare_texts");

    let verdict = if expected_text.trim().is_empty() {
        Verdict::Skipped {
            reason: "expected result is empty".to_string(),
        }
    } else {
        match (
            parse_json_input(Side::Actual, actual_text),
            parse_json_input(Side::Expected, expected_text),
        ) {
            (Err(e), _) | (Ok(_), Err(e)) => Verdict::invalid_json(&e),
            (Ok(actual), Ok(expected)) => compare_values(&actual, &expected, options),
        }
    };

    log_op_end!(
        "compare_texts",
        duration_ms = start.elapsed().as_millis() as u64,
        diff_count = verdict.differences().len() as u64,
        exit_code = verdict.exit_code() as i64
    );
    verdict
}

/// Compare two raw byte buffers, as read from files.
///
/// Non-UTF-8 input yields `InvalidJson` for that side; otherwise as
/// [`compare_texts`].
pub fn compare_bytes(actual: &[u8], expected: &[u8], options: &DiffOptions) -> Verdict {
    match (
        decode_utf8(Side::Actual, actual),
        decode_utf8(Side::Expected, expected),
    ) {
        (Ok(actual_text), Ok(expected_text)) => compare_texts(actual_text, expected_text, options),
        (Err(e), _) | (Ok(_), Err(e)) => Verdict::invalid_json(&e),
    }
}
