//! Structural diff output types.
//!
//! A comparison yields an ordered list of [`Difference`] records. Each record
//! names where the divergence sits ([`JsonPath`]), what kind of divergence it
//! is ([`DifferenceKind`]) and a human-readable detail with value snippets.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Maximum number of chars of a value shown inside a difference detail.
pub const SNIPPET_MAX_CHARS: usize = 80;

/// Structural kind of a JSON value.
///
/// `Null` is its own kind: it never equals a falsy value of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    /// Stable lowercase name used in difference details
    pub fn name(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a path into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key
    Field(String),
    /// Array position
    Index(usize),
}

/// Location of a value inside a JSON document, rendered as `line_items[0].sku`.
///
/// The root path renders as the empty string. Paths are cheap to extend:
/// each child clones the parent's segments once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The document root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from explicit segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Path extended by `.key`
    pub fn child_field(&self, key: &str) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(PathSegment::Field(key.to_string()));
        Self(segments)
    }

    /// Path extended by `[index]`
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(PathSegment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(key) if i == 0 => f.write_str(key)?,
                PathSegment::Field(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification of a single divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Present in expected, absent in actual
    MissingInActual,
    /// Present in actual, absent in expected
    MissingInExpected,
    /// Both present, structural kinds differ
    TypeMismatch,
    /// Same scalar kind, different value
    ValueMismatch,
    /// Both arrays, different lengths
    LengthMismatch,
}

impl DifferenceKind {
    /// Stable snake_case label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            DifferenceKind::MissingInActual => "missing_in_actual",
            DifferenceKind::MissingInExpected => "missing_in_expected",
            DifferenceKind::TypeMismatch => "type_mismatch",
            DifferenceKind::ValueMismatch => "value_mismatch",
            DifferenceKind::LengthMismatch => "length_mismatch",
        }
    }

    /// The label this kind carries when actual and expected trade places
    pub fn mirrored(&self) -> Self {
        match self {
            DifferenceKind::MissingInActual => DifferenceKind::MissingInExpected,
            DifferenceKind::MissingInExpected => DifferenceKind::MissingInActual,
            other => *other,
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single path-qualified divergence between actual and expected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub path: JsonPath,
    pub kind: DifferenceKind,
    pub detail: String,
}

impl Difference {
    pub(crate) fn missing_in_expected(path: JsonPath, actual: &Value) -> Self {
        let detail = format!(
            "'{}' only present in actual (value: {})",
            display_path(&path),
            snippet(actual)
        );
        Self {
            path,
            kind: DifferenceKind::MissingInExpected,
            detail,
        }
    }

    pub(crate) fn missing_in_actual(path: JsonPath, expected: &Value) -> Self {
        let detail = format!(
            "'{}' only present in expected (value: {})",
            display_path(&path),
            snippet(expected)
        );
        Self {
            path,
            kind: DifferenceKind::MissingInActual,
            detail,
        }
    }

    pub(crate) fn type_mismatch(path: JsonPath, actual: &Value, expected: &Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::TypeMismatch,
            detail: format!(
                "type differs: actual is {} {}, expected is {} {}",
                JsonKind::of(actual),
                snippet(actual),
                JsonKind::of(expected),
                snippet(expected)
            ),
        }
    }

    pub(crate) fn value_mismatch(path: JsonPath, actual: &Value, expected: &Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::ValueMismatch,
            detail: format!(
                "value differs: actual {}, expected {}",
                snippet(actual),
                snippet(expected)
            ),
        }
    }

    pub(crate) fn length_mismatch(path: JsonPath, actual_len: usize, expected_len: usize) -> Self {
        Self {
            path,
            kind: DifferenceKind::LengthMismatch,
            detail: format!(
                "array length differs: actual has {} elements, expected has {}",
                actual_len, expected_len
            ),
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", display_path(&self.path), self.detail)
    }
}

/// How arrays of unequal length are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayPolicy {
    /// One `LengthMismatch`, no element comparison
    #[default]
    Strict,
    /// Compare the shared index prefix, then report surplus elements as missing
    IndexAligned,
}

/// Knobs for a comparison. The default reproduces the reference behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub array_policy: ArrayPolicy,
}

impl DiffOptions {
    pub fn index_aligned() -> Self {
        Self {
            array_policy: ArrayPolicy::IndexAligned,
        }
    }
}

/// Path as shown to humans: `$` stands for the document root.
pub fn display_path(path: &JsonPath) -> String {
    if path.is_root() {
        "$".to_string()
    } else {
        path.to_string()
    }
}

/// Compact JSON text of a value, cut to [`SNIPPET_MAX_CHARS`].
pub fn snippet(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_rendering() {
        let path = JsonPath::root()
            .child_field("line_items")
            .child_index(0)
            .child_field("sku");
        assert_eq!(path.to_string(), "line_items[0].sku");
        assert_eq!(JsonPath::root().child_index(2).to_string(), "[2]");
        assert_eq!(JsonPath::root().to_string(), "");
        assert_eq!(display_path(&JsonPath::root()), "$");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = JsonPath::root().child_field("a");
        let _child = parent.child_field("b");
        assert_eq!(parent.segments().len(), 1);
    }

    #[test]
    fn test_kind_of_each_variant() {
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
        assert_eq!(JsonKind::of(&json!(false)), JsonKind::Boolean);
        assert_eq!(JsonKind::of(&json!(1.5)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!("1")), JsonKind::String);
        assert_eq!(JsonKind::of(&json!([])), JsonKind::Array);
        assert_eq!(JsonKind::of(&json!({})), JsonKind::Object);
    }

    #[test]
    fn test_snippet_is_bounded() {
        let long = json!("x".repeat(500));
        let s = snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_MAX_CHARS + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_difference_serializes_path_as_string() {
        let d = Difference::value_mismatch(
            JsonPath::root().child_field("a").child_index(1),
            &json!(2),
            &json!(3),
        );
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["path"], json!("a[1]"));
        assert_eq!(v["kind"], json!("value_mismatch"));
        assert_eq!(v["detail"], json!("value differs: actual 2, expected 3"));
    }

    #[test]
    fn test_mirrored_swaps_only_missing_labels() {
        assert_eq!(
            DifferenceKind::MissingInActual.mirrored(),
            DifferenceKind::MissingInExpected
        );
        assert_eq!(
            DifferenceKind::TypeMismatch.mirrored(),
            DifferenceKind::TypeMismatch
        );
    }
}
