//! Property tests for the structural diff and the formatter.

use expectdiff_core::diff::{diff_values, format_differences, FormatOptions};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-z0-9]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]{1,2}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Sorted (path, label) pairs, optionally with missing-labels swapped
fn labelled(actual: &Value, expected: &Value, mirror: bool) -> Vec<(String, &'static str)> {
    let mut out: Vec<_> = diff_values(actual, expected)
        .into_iter()
        .map(|d| {
            let kind = if mirror { d.kind.mirrored() } else { d.kind };
            (d.path.to_string(), kind.label())
        })
        .collect();
    out.sort();
    out
}

proptest! {
    #[test]
    fn prop_identity(v in arb_json()) {
        let copy = v.clone();
        prop_assert!(diff_values(&v, &copy).is_empty());
    }

    #[test]
    fn prop_symmetric_detection_swapped_labels(a in arb_json(), b in arb_json()) {
        let forward = labelled(&a, &b, false);
        let backward = labelled(&b, &a, true);
        prop_assert_eq!(forward.len(), backward.len());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_deterministic(a in arb_json(), b in arb_json()) {
        prop_assert_eq!(diff_values(&a, &b), diff_values(&a, &b));
    }

    #[test]
    fn prop_truncation_is_safe(
        a in arb_json(),
        b in arb_json(),
        max_len in 3usize..160,
        separator in prop_oneof![Just("; ".to_string()), Just("\n".to_string())],
    ) {
        let diffs = diff_values(&a, &b);
        let options = FormatOptions {
            separator,
            max_len,
            truncation_marker: "...".to_string(),
        };
        let full = format_differences(&diffs, &FormatOptions {
            max_len: usize::MAX,
            ..options.clone()
        }).unwrap();
        let text = format_differences(&diffs, &options).unwrap();

        prop_assert!(text.chars().count() <= max_len);
        if full.chars().count() > max_len {
            prop_assert!(text.ends_with("..."));
        } else {
            prop_assert_eq!(text, full);
        }
    }
}
