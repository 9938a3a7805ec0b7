//! Case naming rules

use super::CaseSummary;
use crate::errors::{invalid_case_name, Result};

/// Request number of a case: the first run of ASCII digits in its name.
///
/// `all_row12_v2` → 12. Names without digits (or with a run too long for
/// `u64`) get 0.
pub fn request_number(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Reject names that would escape the store root or are unusable as file stems.
///
/// # Errors
///
/// `InvalidInput` for empty names, path separators, leading dots and
/// control characters.
pub fn validate_case_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if bad {
        return Err(invalid_case_name(name));
    }
    Ok(())
}

/// Order summaries by request number, then name
pub fn sort_summaries(cases: &mut [CaseSummary]) {
    cases.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
}
