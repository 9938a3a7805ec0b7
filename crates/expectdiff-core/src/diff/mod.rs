//! Structural JSON diff.
//!
//! Compares an *actual* JSON value against an *expected* one and produces an
//! ordered, path-qualified list of every divergence.
//!
//! ## Entry point
//!
//! ```
//! use expectdiff_core::diff::{diff_values, format_differences, FormatOptions};
//! use serde_json::json;
//!
//! let actual = json!({"a": {"b": [1, 2]}});
//! let expected = json!({"a": {"b": [1, 3]}});
//! let diffs = diff_values(&actual, &expected);
//! assert_eq!(diffs[0].path.to_string(), "a.b[1]");
//!
//! let cell = format_differences(&diffs, &FormatOptions::default()).unwrap();
//! assert_eq!(cell, "a.b[1]: value differs: actual 2, expected 3");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical difference sequences.
//! - **Completeness**: every divergence is reported; arrays of unequal length
//!   produce a single `LengthMismatch` under the default policy.
//! - **Purity**: inputs are borrowed, never mutated; no I/O.

pub mod engine;
pub mod format;
pub mod model;

pub use engine::{diff_values, diff_values_with, differences, differences_with, Differences};
pub use format::{format_differences, render_report, FormatOptions, CELL_MAX_CHARS};
pub use model::{
    ArrayPolicy, DiffOptions, Difference, DifferenceKind, JsonKind, JsonPath, PathSegment,
};
