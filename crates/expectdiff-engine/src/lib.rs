//! expectdiff Engine - Orchestration layer
//!
//! Provides the review commands that coordinate the comparison kernel in
//! `expectdiff-core` with a `CaseStore` from `expectdiff-store`.

pub mod commands;

pub use commands::batch::{review_all, BatchReport, BatchSummary, CaseOutcome};
pub use commands::expectation::{reset_expectation, save_expectation};
pub use commands::review::{review_case, CaseReport, ReviewOptions};
