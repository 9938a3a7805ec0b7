//! expectdiff Core - structural comparison of parser output against expectations
//!
//! This crate provides the comparison kernel of the email-parsing QA tooling,
//! including:
//! - Structural JSON diff with path-qualified differences
//! - Bounded difference formatting for cells, responses and logs
//! - The parse boundary that surfaces invalid JSON as its own outcome
//! - Comparison verdicts with stable exit codes
//! - Expectation restoration (placeholder stripping and merge)
//! - Configuration, error and logging facilities

pub mod config;
pub mod diff;
pub mod errors;
pub mod expectation;
pub mod input;
pub mod logging_facility;
pub mod verdict;

// Used by the logging macros
#[doc(hidden)]
pub use expectdiff_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use config::ToolConfig;
pub use diff::{diff_values, differences, Difference, DifferenceKind, FormatOptions};
pub use errors::{DiffToolError, ExError, ExErrorKind};
pub use input::Side;
pub use verdict::{compare_bytes, compare_texts, compare_values, Verdict};
