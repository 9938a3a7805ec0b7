//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Commands here own lifecycle logging (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`). The store and the comparison kernel below only emit
//! `tracing::debug!()` details, with the exception of `compare_texts`, which
//! is itself a boundary for callers that skip the engine.

pub mod batch;
pub mod expectation;
pub mod review;
