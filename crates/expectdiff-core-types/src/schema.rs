//! Field keys and event names shared by the logging macros, the test
//! capture layer and anyone parsing `--log-json` output.
//!
//! The macros cannot interpolate constants into field names, so the values
//! here must match the identifiers spelled out in `expectdiff-core`'s
//! `log_op_*` macros and commands.

/// Module path of the emitting code
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, e.g. `review_case`
pub const FIELD_OP: &str = "op";
/// One of the `EVENT_*` names
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

pub const FIELD_RUN_ID: &str = "run_id";
pub const FIELD_CASE: &str = "case";
pub const FIELD_DIFF_COUNT: &str = "diff_count";
pub const FIELD_CASE_COUNT: &str = "case_count";

pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_are_plain_identifiers() {
        // JSON log consumers index by these keys; dots would nest in some tools.
        for key in [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_RUN_ID,
            FIELD_CASE,
            FIELD_DIFF_COUNT,
            FIELD_CASE_COUNT,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{}", key);
        }
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
