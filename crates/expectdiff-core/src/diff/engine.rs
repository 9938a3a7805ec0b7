//! Structural diff computation engine.
//!
//! The core entry point is [`differences`], which walks `actual` and
//! `expected` depth-first and lazily yields a [`Difference`] for every
//! divergence. [`diff_values`] collects the same sequence into a `Vec`.
//!
//! Per object level, keys only in `actual` come first, then shared keys
//! (recursively), then keys only in `expected`. Array elements are compared
//! strictly by index.

use crate::diff::model::{ArrayPolicy, DiffOptions, Difference, JsonKind, JsonPath};
use serde_json::{Map, Number, Value};

/// Pending work on the traversal stack.
#[derive(Debug, Clone)]
enum Task<'a> {
    Compare {
        path: JsonPath,
        actual: &'a Value,
        expected: &'a Value,
    },
    Emit(Difference),
}

/// Lazy, depth-first sequence of differences between two JSON values.
///
/// The sequence is finite and borrows its inputs without mutating them.
/// Cloning the iterator before consuming it gives an independent replay of
/// the same output.
#[derive(Debug, Clone)]
pub struct Differences<'a> {
    stack: Vec<Task<'a>>,
    options: DiffOptions,
}

impl<'a> Differences<'a> {
    fn new(actual: &'a Value, expected: &'a Value, prefix: JsonPath, options: DiffOptions) -> Self {
        Self {
            stack: vec![Task::Compare {
                path: prefix,
                actual,
                expected,
            }],
            options,
        }
    }

    /// Compare one pair. Returns a difference found at this node, or queues
    /// the children and returns `None`.
    fn expand(
        &mut self,
        path: JsonPath,
        actual: &'a Value,
        expected: &'a Value,
    ) -> Option<Difference> {
        match (actual, expected) {
            (Value::Array(a), Value::Array(e)) => self.expand_arrays(path, a, e),
            _ if JsonKind::of(actual) != JsonKind::of(expected) => {
                Some(Difference::type_mismatch(path, actual, expected))
            }
            (Value::Object(a), Value::Object(e)) => {
                self.expand_objects(&path, a, e);
                None
            }
            _ if scalars_equal(actual, expected) => None,
            _ => Some(Difference::value_mismatch(path, actual, expected)),
        }
    }

    fn expand_arrays(
        &mut self,
        path: JsonPath,
        actual: &'a [Value],
        expected: &'a [Value],
    ) -> Option<Difference> {
        if actual.len() != expected.len() && self.options.array_policy == ArrayPolicy::Strict {
            return Some(Difference::length_mismatch(path, actual.len(), expected.len()));
        }

        let shared = actual.len().min(expected.len());
        let mut tasks: Vec<Task<'a>> = Vec::with_capacity(actual.len().max(expected.len()));
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            tasks.push(Task::Compare {
                path: path.child_index(i),
                actual: a,
                expected: e,
            });
        }
        for (i, a) in actual.iter().enumerate().skip(shared) {
            tasks.push(Task::Emit(Difference::missing_in_expected(path.child_index(i), a)));
        }
        for (i, e) in expected.iter().enumerate().skip(shared) {
            tasks.push(Task::Emit(Difference::missing_in_actual(path.child_index(i), e)));
        }
        self.stack.extend(tasks.into_iter().rev());
        None
    }

    fn expand_objects(
        &mut self,
        path: &JsonPath,
        actual: &'a Map<String, Value>,
        expected: &'a Map<String, Value>,
    ) {
        let mut tasks: Vec<Task<'a>> = Vec::new();

        // Keys only on the actual side
        for (key, a) in actual {
            if !expected.contains_key(key) {
                tasks.push(Task::Emit(Difference::missing_in_expected(path.child_field(key), a)));
            }
        }

        // Shared keys
        for (key, a) in actual {
            if let Some(e) = expected.get(key) {
                tasks.push(Task::Compare {
                    path: path.child_field(key),
                    actual: a,
                    expected: e,
                });
            }
        }

        // Keys only on the expected side
        for (key, e) in expected {
            if !actual.contains_key(key) {
                tasks.push(Task::Emit(Difference::missing_in_actual(path.child_field(key), e)));
            }
        }

        self.stack.extend(tasks.into_iter().rev());
    }
}

impl Iterator for Differences<'_> {
    type Item = Difference;

    fn next(&mut self) -> Option<Difference> {
        while let Some(task) = self.stack.pop() {
            match task {
                Task::Emit(difference) => return Some(difference),
                Task::Compare {
                    path,
                    actual,
                    expected,
                } => {
                    if let Some(difference) = self.expand(path, actual, expected) {
                        return Some(difference);
                    }
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Differences<'_> {}

/// Scalars of the same kind under exact equality.
fn scalars_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => numbers_equal(a, e),
        _ => actual == expected,
    }
}

/// 2^127, the first integral `f64` outside the `i128` range
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// An integer equals a float only when the float is integral and has
/// exactly that value, so `9007199254740993 != 9007199254740992.0`.
fn float_equals_integer(float: Option<f64>, integer: i128) -> bool {
    match float {
        Some(f) if f.fract() == 0.0 && f.abs() < I128_LIMIT => f as i128 == integer,
        _ => false,
    }
}

/// Integers compare exactly, floats compare as `f64`, and a mixed pair
/// compares without rounding the integer.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_value(a), integer_value(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => float_equals_integer(b.as_f64(), x),
        (None, Some(y)) => float_equals_integer(a.as_f64(), y),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

/// Lazily diff `actual` against `expected` from the document root.
pub fn differences<'a>(actual: &'a Value, expected: &'a Value) -> Differences<'a> {
    Differences::new(actual, expected, JsonPath::root(), DiffOptions::default())
}

/// Lazily diff with an explicit path prefix and options.
pub fn differences_with<'a>(
    actual: &'a Value,
    expected: &'a Value,
    prefix: JsonPath,
    options: &DiffOptions,
) -> Differences<'a> {
    Differences::new(actual, expected, prefix, options.clone())
}

/// Collect every difference between `actual` and `expected`.
pub fn diff_values(actual: &Value, expected: &Value) -> Vec<Difference> {
    differences(actual, expected).collect()
}

/// Collect every difference, with an explicit path prefix and options.
pub fn diff_values_with(
    actual: &Value,
    expected: &Value,
    prefix: JsonPath,
    options: &DiffOptions,
) -> Vec<Difference> {
    differences_with(actual, expected, prefix, options).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::DifferenceKind;
    use serde_json::json;

    #[test]
    fn test_scalar_value_mismatch_at_root() {
        let diffs = diff_values(&json!(1), &json!(2));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DifferenceKind::ValueMismatch);
        assert!(diffs[0].path.is_root());
    }

    #[test]
    fn test_integer_and_float_compare_by_value() {
        assert!(diff_values(&json!(1), &json!(1.0)).is_empty());
        assert_eq!(diff_values(&json!(1), &json!(1.5)).len(), 1);
        assert!(diff_values(&json!(u64::MAX), &json!(u64::MAX)).is_empty());
        assert_eq!(diff_values(&json!(-1), &json!(u64::MAX)).len(), 1);
    }

    #[test]
    fn test_large_integer_is_not_rounded_against_float() {
        let two_pow_53 = 9_007_199_254_740_992_f64;
        assert_eq!(
            diff_values(&json!(9_007_199_254_740_993_u64), &json!(two_pow_53)).len(),
            1
        );
        assert_eq!(
            diff_values(&json!(two_pow_53), &json!(9_007_199_254_740_993_i64)).len(),
            1
        );
        assert!(diff_values(&json!(9_007_199_254_740_992_i64), &json!(two_pow_53)).is_empty());
        assert!(diff_values(&json!(-3), &json!(-3.0)).is_empty());
        assert_eq!(diff_values(&json!(u64::MAX), &json!(1.0e30)).len(), 1);
    }

    #[test]
    fn test_prefix_is_applied() {
        let diffs = diff_values_with(
            &json!({"sku": "A"}),
            &json!({"sku": "B"}),
            JsonPath::root().child_field("line_items").child_index(0),
            &DiffOptions::default(),
        );
        assert_eq!(diffs[0].path.to_string(), "line_items[0].sku");
    }

    #[test]
    fn test_iterator_is_fused_after_exhaustion() {
        let a = json!({"x": 1});
        let e = json!({"x": 2});
        let mut it = differences(&a, &e);
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_index_aligned_reports_surplus_elements() {
        let a = json!([1, 2, 3]);
        let e = json!([1, 9]);
        let diffs = diff_values_with(&a, &e, JsonPath::root(), &DiffOptions::index_aligned());
        let kinds: Vec<_> = diffs.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DifferenceKind::ValueMismatch, DifferenceKind::MissingInExpected]
        );
        assert_eq!(diffs[0].path.to_string(), "[1]");
        assert_eq!(diffs[1].path.to_string(), "[2]");
    }

    #[test]
    fn test_index_aligned_surplus_on_expected_side() {
        let diffs = diff_values_with(
            &json!({"tags": []}),
            &json!({"tags": ["a", "b"]}),
            JsonPath::root(),
            &DiffOptions::index_aligned(),
        );
        assert_eq!(diffs.len(), 2);
        assert!(diffs
            .iter()
            .all(|d| d.kind == DifferenceKind::MissingInActual));
        assert_eq!(diffs[1].path.to_string(), "tags[1]");
    }
}
