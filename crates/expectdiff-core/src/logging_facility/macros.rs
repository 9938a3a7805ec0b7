//! Canonical logging macros
//!
//! Each macro expands to one `tracing` event carrying the `component`, `op`
//! and `event` fields, followed by any caller fields. Macros reach `tracing`
//! and the schema constants through `$crate`, so callers only need
//! `expectdiff-core` as a dependency.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use expectdiff_core::log_op_start;
/// log_op_start!("review_case");
/// log_op_start!("review_case", case = "all_row2");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::expectdiff_core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use expectdiff_core::log_op_end;
/// log_op_end!("review_case", duration_ms = 42);
/// log_op_end!("review_case", duration_ms = 42, diff_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::expectdiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log an operation error
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are always on the event.
///
/// # Example
///
/// ```
/// # use expectdiff_core::{log_op_error, errors::DiffToolError};
/// let err = DiffToolError::CaseNotFound { case: "all_row9".to_string() };
/// log_op_error!("review_case", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::expectdiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)+)?
        )
    }};
}
