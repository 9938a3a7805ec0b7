//! Error handling for expectdiff-store
//!
//! Wraps expectdiff-core ExError with store-specific helpers

use expectdiff_core::errors::{DiffToolError, ExError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a missing case error
pub fn case_not_found(op: &str, case: &str) -> ExError {
    ExError::from(DiffToolError::CaseNotFound {
        case: case.to_string(),
    })
    .with_op(op)
}

/// Create an invalid case name error
pub fn invalid_case_name(case: &str) -> ExError {
    ExError::from(DiffToolError::InvalidCaseName {
        case: case.to_string(),
    })
    .with_op("validate_case_name")
}

/// Create an error for a value that could not be encoded for storage
pub fn encoding_failed(op: &str, case: &str, err: serde_json::Error) -> ExError {
    ExError::from(DiffToolError::from(err))
        .with_op(op)
        .with_entity_id(case)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    expectdiff_core::errors::io_error(operation, err)
}
