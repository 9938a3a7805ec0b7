//! Expectation restoration.
//!
//! The review UI hides large inline image payloads behind placeholder
//! strings before an operator edits an expectation. Saved expectations can
//! therefore carry placeholders instead of real data. Restoring an
//! expectation drops every placeholder field and merges what remains over
//! the original response, so the hidden payloads come back from the
//! response and the operator's edits win everywhere else.

use serde_json::{Map, Value};

/// Placeholder strings the review UI substitutes for hidden payloads.
///
/// The first three are what the review UI actually writes; the English
/// forms cover expectations edited by hand.
pub const DEFAULT_REDACTION_MARKERS: &[&str] = &[
    "[图片数据已隐藏]",
    "[Base64图片数据已隐藏]",
    "[图片已隐藏]",
    "[image data hidden]",
    "[base64 image data hidden]",
    "[image hidden]",
];

/// Owned copy of [`DEFAULT_REDACTION_MARKERS`], for configuration defaults
pub fn default_markers() -> Vec<String> {
    DEFAULT_REDACTION_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn is_redacted(value: &Value, markers: &[String]) -> bool {
    match value {
        Value::String(s) => markers.iter().any(|m| s.contains(m.as_str())),
        _ => false,
    }
}

/// Strip placeholder fields.
///
/// Object fields whose string value contains a marker are dropped;
/// containers left empty are dropped as well. Returns `None` when nothing
/// remains.
pub fn clean_redacted(value: &Value, markers: &[String]) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let mut cleaned = Map::new();
            for (key, v) in map {
                if is_redacted(v, markers) {
                    continue;
                }
                match v {
                    Value::Object(_) | Value::Array(_) => {
                        if let Some(c) = clean_redacted(v, markers) {
                            cleaned.insert(key.clone(), c);
                        }
                    }
                    _ => {
                        cleaned.insert(key.clone(), v.clone());
                    }
                }
            }
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => {
            let cleaned: Vec<Value> = items
                .iter()
                .filter_map(|item| clean_redacted(item, markers))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        other => Some(other.clone()),
    }
}

/// Merge `edited` over `original`.
///
/// Objects merge key-wise and recursively. Arrays merge index-wise: edited
/// elements replace (or merge into) the original element at the same index,
/// surplus edited elements are ignored and surplus original elements kept.
/// Anything else: `edited` wins.
pub fn merge_over(original: &Value, edited: &Value) -> Value {
    match (original, edited) {
        (Value::Object(orig), Value::Object(edit)) => {
            let mut merged = orig.clone();
            for (key, value) in edit {
                let next = match merged.get(key) {
                    Some(existing @ Value::Object(_)) if value.is_object() => {
                        merge_over(existing, value)
                    }
                    Some(Value::Array(existing)) if value.is_array() => {
                        merge_arrays(existing, value.as_array().map(Vec::as_slice).unwrap_or(&[]))
                    }
                    _ => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, edited) => edited.clone(),
    }
}

fn merge_arrays(original: &[Value], edited: &[Value]) -> Value {
    let mut merged = original.to_vec();
    for (slot, item) in merged.iter_mut().zip(edited) {
        *slot = if slot.is_object() && item.is_object() {
            merge_over(slot, item)
        } else {
            item.clone()
        };
    }
    Value::Array(merged)
}

/// Rebuild the effective expectation for a case.
///
/// Placeholders are stripped from `edited` and the rest merged over
/// `response`. If stripping leaves nothing, the expectation was nothing but
/// placeholders and the response itself is returned.
pub fn restore_expectation(response: &Value, edited: &Value, markers: &[String]) -> Value {
    match clean_redacted(edited, markers) {
        Some(cleaned) => merge_over(response, &cleaned),
        None => response.clone(),
    }
}
