//! Text renderers for difference lists.
//!
//! [`format_differences`] produces the single bounded string a spreadsheet
//! cell, web response or log line shows. [`render_report`] produces the
//! multi-line listing used by the command line.

use crate::diff::model::{display_path, Difference};
use crate::errors::DiffToolError;
use serde::Deserialize;

/// Character limit of a single spreadsheet cell
pub const CELL_MAX_CHARS: usize = 32_767;

/// Options for [`format_differences`].
///
/// Lengths are counted in chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub separator: String,
    pub max_len: usize,
    pub truncation_marker: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: "; ".to_string(),
            max_len: CELL_MAX_CHARS,
            truncation_marker: "...".to_string(),
        }
    }
}

/// Join differences with the configured separator, bounded by `max_len`.
///
/// When the joined text is too long, whole records are kept while they fit
/// alongside the truncation marker, then the marker is appended. If not even
/// the first record fits, it is cut at a char boundary. The result never
/// exceeds `max_len` and always ends with the intact marker when truncated.
///
/// # Errors
///
/// `FormatLimitTooSmall` if `max_len` cannot hold the marker itself.
pub fn format_differences<'a, I>(
    differences: I,
    options: &FormatOptions,
) -> Result<String, DiffToolError>
where
    I: IntoIterator<Item = &'a Difference>,
{
    let marker_len = options.truncation_marker.chars().count();
    if options.max_len < marker_len {
        return Err(DiffToolError::FormatLimitTooSmall {
            max_len: options.max_len,
            marker_len,
        });
    }

    let records: Vec<String> = differences.into_iter().map(|d| d.to_string()).collect();
    let separator_len = options.separator.chars().count();
    let lengths: Vec<usize> = records.iter().map(|r| r.chars().count()).collect();
    let full_len: usize =
        lengths.iter().sum::<usize>() + separator_len * records.len().saturating_sub(1);

    if full_len <= options.max_len {
        return Ok(records.join(&options.separator));
    }

    let budget = options.max_len - marker_len;
    let mut out = String::new();
    let mut used = 0usize;
    for (i, (record, len)) in records.iter().zip(&lengths).enumerate() {
        let cost = if i == 0 { *len } else { len + separator_len };
        if used + cost > budget {
            break;
        }
        if i > 0 {
            out.push_str(&options.separator);
        }
        out.push_str(record);
        used += cost;
    }

    if used == 0 {
        if let Some(first) = records.first() {
            out.extend(first.chars().take(budget));
        }
    }

    out.push_str(&options.truncation_marker);
    Ok(out)
}

/// Multi-line human-readable listing of a difference list.
pub fn render_report(differences: &[Difference]) -> String {
    if differences.is_empty() {
        return "No differences.\n".to_string();
    }

    let noun = if differences.len() == 1 {
        "difference"
    } else {
        "differences"
    };
    let mut out = format!("{} {}:\n", differences.len(), noun);
    for d in differences {
        out.push_str(&format!(
            "  - [{}] {}: {}\n",
            d.kind,
            display_path(&d.path),
            d.detail
        ));
    }
    out
}
