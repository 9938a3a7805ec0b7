//! Expectation maintenance commands.

#![allow(clippy::result_large_err)]

use expectdiff_core::input::{parse_json_input, Side};
use expectdiff_core::{log_op_end, log_op_error, log_op_start};
use expectdiff_store::errors::Result;
use expectdiff_store::CaseStore;
use serde_json::Value;

/// Parse and store a new expectation for a case.
///
/// Returns the stored value.
///
/// # Errors
///
/// - `InvalidJson`: the text does not parse (nothing is written)
/// - `NotFound`: the case has no response
/// - `Io`: the store could not be written
pub fn save_expectation(store: &dyn CaseStore, case: &str, text: &str) -> Result<Value> {
    log_op_start!("save_expectation", case = case);
    let start = std::time::Instant::now();

    let result = parse_json_input(Side::Expected, text)
        .map_err(|e| e.with_entity_id(case))
        .and_then(|value| store.save_expectation(case, &value).map(|()| value))
        .map_err(|e| {
            log_op_error!(
                "save_expectation",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                case = case
            );
            e
        })?;

    log_op_end!(
        "save_expectation",
        duration_ms = start.elapsed().as_millis() as u64,
        case = case
    );

    Ok(result)
}

/// Drop a case's saved expectation so it falls back to its response.
///
/// Returns whether an expectation existed.
///
/// # Errors
///
/// - `InvalidInput`: unusable case name
/// - `Io`: the store could not be written
pub fn reset_expectation(store: &dyn CaseStore, case: &str) -> Result<bool> {
    log_op_start!("reset_expectation", case = case);
    let start = std::time::Instant::now();

    let removed = store.reset_expectation(case).map_err(|e| {
        log_op_error!(
            "reset_expectation",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            case = case
        );
        e
    })?;

    log_op_end!(
        "reset_expectation",
        duration_ms = start.elapsed().as_millis() as u64,
        case = case,
        removed = removed
    );

    Ok(removed)
}
