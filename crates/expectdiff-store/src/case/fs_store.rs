//! Filesystem case store
//!
//! Layout under the root:
//!
//! ```text
//! <root>/responses/<case>.json
//! <root>/expectations/expectation_<case>.json
//! ```

#![allow(clippy::result_large_err)]

use super::atomic::atomic_write;
use super::naming::{sort_summaries, validate_case_name};
use super::{CaseStore, CaseSummary};
use crate::errors::{case_not_found, encoding_failed, io_error, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const RESPONSES_DIR: &str = "responses";
const EXPECTATIONS_DIR: &str = "expectations";
const EXPECTATION_PREFIX: &str = "expectation_";

/// Filesystem-backed case store
#[derive(Debug, Clone)]
pub struct FsCaseStore {
    root: PathBuf,
}

impl FsCaseStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a case's response file
    pub fn response_path(&self, case: &str) -> PathBuf {
        self.root.join(RESPONSES_DIR).join(format!("{}.json", case))
    }

    /// Path of a case's expectation file
    pub fn expectation_path(&self, case: &str) -> PathBuf {
        self.root
            .join(EXPECTATIONS_DIR)
            .join(format!("{}{}.json", EXPECTATION_PREFIX, case))
    }

    fn require_response(&self, op: &str, case: &str) -> Result<PathBuf> {
        validate_case_name(case)?;
        let path = self.response_path(case);
        if !path.is_file() {
            return Err(case_not_found(op, case));
        }
        Ok(path)
    }
}

/// Read a file, mapping a missing file to `None`
fn read_optional(op: &str, path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(op, e).with_entity_id(path.display().to_string())),
    }
}

impl CaseStore for FsCaseStore {
    fn list_cases(&self) -> Result<Vec<CaseSummary>> {
        let dir = self.root.join(RESPONSES_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            // A store without responses yet is empty, not broken
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %dir.display(), "responses directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(io_error("list_cases", e).with_entity_id(dir.display().to_string()))
            }
        };

        let mut cases = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_cases", e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") || !path.is_file() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_case_name(name).is_err() {
                continue;
            }
            let has_expectation = self.expectation_path(name).is_file();
            cases.push(CaseSummary::new(name, has_expectation));
        }

        if cases.is_empty() {
            tracing::warn!(path = %dir.display(), "no response files in store");
        }
        sort_summaries(&mut cases);
        Ok(cases)
    }

    fn load_response(&self, case: &str) -> Result<Vec<u8>> {
        let path = self.require_response("load_response", case)?;
        fs::read(&path).map_err(|e| io_error("load_response", e).with_entity_id(case))
    }

    fn load_expectation(&self, case: &str) -> Result<Option<Vec<u8>>> {
        validate_case_name(case)?;
        read_optional("load_expectation", &self.expectation_path(case))
    }

    fn save_expectation(&self, case: &str, expectation: &Value) -> Result<()> {
        self.require_response("save_expectation", case)?;
        let body = serde_json::to_vec_pretty(expectation)
            .map_err(|e| encoding_failed("save_expectation", case, e))?;
        let path = self.expectation_path(case);
        atomic_write(&path, &body).map_err(|e| e.with_entity_id(case))?;
        tracing::debug!(case, path = %path.display(), "expectation written");
        Ok(())
    }

    fn reset_expectation(&self, case: &str) -> Result<bool> {
        validate_case_name(case)?;
        match fs::remove_file(self.expectation_path(case)) {
            Ok(()) => {
                tracing::debug!(case, "expectation removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("reset_expectation", e).with_entity_id(case)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_test_store() -> (FsCaseStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FsCaseStore::new(temp_dir.path());
        (store, temp_dir)
    }

    fn put_response(store: &FsCaseStore, case: &str, body: &str) {
        let path = store.response_path(case);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_save_then_load_expectation() {
        let (store, _dir) = setup_test_store();
        put_response(&store, "all_row1", r#"{"a": 1}"#);

        store
            .save_expectation("all_row1", &json!({"a": 2}))
            .unwrap();

        let bytes = store.load_expectation("all_row1").unwrap().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"a": 2}));
    }

    #[test]
    fn test_expectation_is_pretty_printed() {
        let (store, _dir) = setup_test_store();
        put_response(&store, "all_row1", "{}");

        store
            .save_expectation("all_row1", &json!({"a": [1]}))
            .unwrap();

        let text = fs::read_to_string(store.expectation_path("all_row1")).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_missing_expectation_is_none() {
        let (store, _dir) = setup_test_store();
        put_response(&store, "all_row1", "{}");

        assert_eq!(store.load_expectation("all_row1").unwrap(), None);
    }

    #[test]
    fn test_reset_reports_whether_removed() {
        let (store, _dir) = setup_test_store();
        put_response(&store, "all_row1", "{}");
        store.save_expectation("all_row1", &json!({})).unwrap();

        assert!(store.reset_expectation("all_row1").unwrap());
        assert!(!store.reset_expectation("all_row1").unwrap());
    }

    #[test]
    fn test_list_of_empty_root_is_empty() {
        let (store, _dir) = setup_test_store();
        assert!(store.list_cases().unwrap().is_empty());
    }
}
