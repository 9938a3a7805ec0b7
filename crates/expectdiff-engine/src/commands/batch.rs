//! Batch review over every case in a store.
//!
//! Each case is reviewed independently: a store failure on one case is
//! recorded against that case and the run continues.

#![allow(clippy::result_large_err)]

use super::review::{review_case, CaseReport, ReviewOptions};
use expectdiff_core::verdict::{EXIT_FAILURE, EXIT_MATCH};
use expectdiff_core::{log_op_end, log_op_error, log_op_start, Verdict};
use expectdiff_core_types::RunId;
use expectdiff_store::errors::Result;
use expectdiff_store::CaseStore;
use serde::Serialize;

/// What happened to one case in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    Reviewed(CaseReport),
    /// The store could not supply the case
    Failed {
        case: String,
        code: &'static str,
        error: String,
    },
}

impl CaseOutcome {
    pub fn case(&self) -> &str {
        match self {
            CaseOutcome::Reviewed(report) => &report.case,
            CaseOutcome::Failed { case, .. } => case,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CaseOutcome::Reviewed(report) => report.exit_code(),
            CaseOutcome::Failed { .. } => EXIT_FAILURE,
        }
    }
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub invalid: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &CaseOutcome) {
        self.total += 1;
        match outcome {
            CaseOutcome::Failed { .. } => self.failed += 1,
            CaseOutcome::Reviewed(report) => match report.verdict {
                Verdict::Match => self.matched += 1,
                Verdict::Mismatch { .. } => self.mismatched += 1,
                Verdict::InvalidJson { .. } => self.invalid += 1,
                Verdict::Skipped { .. } => self.skipped += 1,
            },
        }
    }
}

/// Result of reviewing a whole store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub run_id: RunId,
    pub cases: Vec<CaseOutcome>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Worst per-case exit code; 0 for an empty store
    pub fn exit_code(&self) -> i32 {
        self.cases
            .iter()
            .map(CaseOutcome::exit_code)
            .max()
            .unwrap_or(EXIT_MATCH)
    }
}

/// Review every case in the store, in listing order.
///
/// # Errors
///
/// Only when the store cannot list its cases. Per-case failures are
/// reported as `CaseOutcome::Failed`.
pub fn review_all(store: &dyn CaseStore, options: &ReviewOptions) -> Result<BatchReport> {
    let run_id = RunId::new();
    log_op_start!("review_all", run_id = run_id.as_str());
    let start = std::time::Instant::now();

    let cases = store.list_cases().map_err(|e| {
        log_op_error!(
            "review_all",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    let mut summary = BatchSummary::default();
    let mut outcomes = Vec::with_capacity(cases.len());
    for entry in cases {
        let outcome = match review_case(store, &entry.name, options) {
            Ok(report) => CaseOutcome::Reviewed(report),
            Err(e) => CaseOutcome::Failed {
                case: entry.name,
                code: e.code(),
                error: e.to_string(),
            },
        };
        summary.record(&outcome);
        outcomes.push(outcome);
    }

    log_op_end!(
        "review_all",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        case_count = summary.total as u64,
        failed = summary.failed as u64
    );

    Ok(BatchReport {
        run_id,
        cases: outcomes,
        summary,
    })
}
