//! Single-case review.
//!
//! A case's effective expectation is rebuilt before comparison: placeholder
//! fields are stripped from the saved expectation and the remainder merged
//! over the response. A case with no saved expectation is its own
//! expectation and therefore matches.

#![allow(clippy::result_large_err)]

use expectdiff_core::diff::DiffOptions;
use expectdiff_core::expectation::{default_markers, restore_expectation};
use expectdiff_core::input::{parse_json_bytes, Side};
use expectdiff_core::{
    compare_values, log_op_end, log_op_error, log_op_start, ToolConfig, Verdict,
};
use expectdiff_store::errors::Result;
use expectdiff_store::CaseStore;
use serde::Serialize;

/// Knobs for reviewing cases
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOptions {
    pub diff: DiffOptions,
    /// Placeholder strings stripped from saved expectations
    pub redaction_markers: Vec<String>,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            redaction_markers: default_markers(),
        }
    }
}

impl ReviewOptions {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            diff: config.diff_options(),
            redaction_markers: config.expectation.redaction_markers.clone(),
        }
    }
}

/// Review result for one case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub case: String,
    pub has_expectation: bool,
    pub verdict: Verdict,
}

impl CaseReport {
    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }
}

/// Review one case against its saved expectation.
///
/// Unparseable stored content is reported as an `InvalidJson` verdict, not
/// an error.
///
/// # Errors
///
/// - `NotFound`: the case has no response
/// - `InvalidInput`: unusable case name
/// - `Io`: the store could not be read
pub fn review_case(
    store: &dyn CaseStore,
    case: &str,
    options: &ReviewOptions,
) -> Result<CaseReport> {
    log_op_start!("review_case", case = case);
    let start = std::time::Instant::now();

    let report = review_case_impl(store, case, options).map_err(|e| {
        log_op_error!(
            "review_case",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            case = case
        );
        e
    })?;

    log_op_end!(
        "review_case",
        duration_ms = start.elapsed().as_millis() as u64,
        case = case,
        diff_count = report.verdict.differences().len() as u64
    );

    Ok(report)
}

fn review_case_impl(
    store: &dyn CaseStore,
    case: &str,
    options: &ReviewOptions,
) -> Result<CaseReport> {
    let response_bytes = store.load_response(case)?;
    let expectation_bytes = store.load_expectation(case)?;
    let has_expectation = expectation_bytes.is_some();

    let report = |verdict| CaseReport {
        case: case.to_string(),
        has_expectation,
        verdict,
    };

    let response = match parse_json_bytes(Side::Actual, &response_bytes) {
        Ok(v) => v,
        Err(e) => return Ok(report(Verdict::invalid_json(&e.with_entity_id(case)))),
    };

    let Some(expectation_bytes) = expectation_bytes else {
        return Ok(report(Verdict::Match));
    };

    if expectation_bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(report(Verdict::Skipped {
            reason: "saved expectation is empty".to_string(),
        }));
    }

    let edited = match parse_json_bytes(Side::Expected, &expectation_bytes) {
        Ok(v) => v,
        Err(e) => return Ok(report(Verdict::invalid_json(&e.with_entity_id(case)))),
    };

    let expected = restore_expectation(&response, &edited, &options.redaction_markers);
    Ok(report(compare_values(&response, &expected, &options.diff)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expectdiff_core::errors::ExErrorKind;
    use expectdiff_core::DifferenceKind;
    use expectdiff_store::MemoryCaseStore;
    use serde_json::json;

    fn store_with(case: &str, response: &str) -> MemoryCaseStore {
        let store = MemoryCaseStore::new();
        store.insert_response(case, response).unwrap();
        store
    }

    #[test]
    fn test_case_without_expectation_matches_itself() {
        let store = store_with("all_row1", r#"{"total": 10}"#);

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert_eq!(report.verdict, Verdict::Match);
        assert!(!report.has_expectation);
    }

    #[test]
    fn test_edited_expectation_is_compared() {
        let store = store_with("all_row1", r#"{"total": 10, "currency": "USD"}"#);
        store
            .save_expectation("all_row1", &json!({"total": 12}))
            .unwrap();

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert!(report.has_expectation);
        let diffs = report.verdict.differences();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path.to_string(), "total");
        assert_eq!(diffs[0].kind, DifferenceKind::ValueMismatch);
    }

    #[test]
    fn test_placeholders_do_not_cause_differences() {
        let store = store_with("all_row1", r#"{"logo": "iVBORw0KGgo=", "total": 10}"#);
        store
            .save_expectation(
                "all_row1",
                &json!({"logo": "[image data hidden]", "total": 10}),
            )
            .unwrap();

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert_eq!(report.verdict, Verdict::Match);
    }

    #[test]
    fn test_review_ui_placeholders_are_default_markers() {
        let response = json!({
            "logo": "iVBORw0KGgo=",
            "scan": "data:image/png;base64,AAAA",
            "icons": [{"src": "R0lGOD"}],
            "total": 10
        });
        let store = store_with("all_row2", &response.to_string());
        store
            .save_expectation(
                "all_row2",
                &json!({
                    "logo": "[图片数据已隐藏]",
                    "scan": "[Base64图片数据已隐藏] (2KB)",
                    "icons": [{"src": "[图片已隐藏]"}],
                    "total": 10
                }),
            )
            .unwrap();

        let report = review_case(&store, "all_row2", &ReviewOptions::default()).unwrap();

        assert!(report.has_expectation);
        assert_eq!(report.verdict, Verdict::Match);
    }

    #[test]
    fn test_corrupt_expectation_is_invalid_json_verdict() {
        let store = store_with("all_row1", "{}");
        store.insert_raw_expectation("all_row1", "{oops").unwrap();

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert!(matches!(
            report.verdict,
            Verdict::InvalidJson {
                side: Side::Expected,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_response_is_never_a_match() {
        let store = store_with("all_row1", "<html>");

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert!(matches!(
            report.verdict,
            Verdict::InvalidJson {
                side: Side::Actual,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_expectation_is_skipped() {
        let store = store_with("all_row1", "{}");
        store.insert_raw_expectation("all_row1", "  \n").unwrap();

        let report = review_case(&store, "all_row1", &ReviewOptions::default()).unwrap();

        assert!(matches!(report.verdict, Verdict::Skipped { .. }));
    }

    #[test]
    fn test_unknown_case_is_error() {
        let store = MemoryCaseStore::new();

        let err = review_case(&store, "all_row9", &ReviewOptions::default()).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
}
