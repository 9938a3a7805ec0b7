// Integration tests for the filesystem case store

use expectdiff_core::errors::ExErrorKind;
use expectdiff_store::{CaseStore, FsCaseStore};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// Helper to create a store with the given responses on disk
fn setup_store(responses: &[(&str, &str)]) -> (FsCaseStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp store directory");
    let store = FsCaseStore::new(dir.path());
    fs::create_dir_all(dir.path().join("responses")).unwrap();
    for (name, body) in responses {
        fs::write(store.response_path(name), body).unwrap();
    }
    (store, dir)
}

#[test]
fn test_list_cases_sorted_by_request_number() {
    let (store, dir) = setup_store(&[
        ("all_row10", "{}"),
        ("all_row2", "{}"),
        ("all_row1", "{}"),
    ]);
    // Non-JSON files are ignored
    fs::write(dir.path().join("responses").join("notes.txt"), "x").unwrap();

    let names: Vec<_> = store
        .list_cases()
        .unwrap()
        .into_iter()
        .map(|c| (c.name, c.number))
        .collect();

    assert_eq!(
        names,
        vec![
            ("all_row1".to_string(), 1),
            ("all_row2".to_string(), 2),
            ("all_row10".to_string(), 10),
        ]
    );
}

#[test]
fn test_save_marks_case_as_having_expectation() {
    let (store, dir) = setup_store(&[("all_row1", r#"{"total": 10}"#)]);

    store
        .save_expectation("all_row1", &json!({"total": 12}))
        .unwrap();

    let cases = store.list_cases().unwrap();
    assert!(cases[0].has_expectation);

    let on_disk = dir
        .path()
        .join("expectations")
        .join("expectation_all_row1.json");
    let value: Value = serde_json::from_str(&fs::read_to_string(on_disk).unwrap()).unwrap();
    assert_eq!(value, json!({"total": 12}));
}

#[test]
fn test_save_replaces_previous_expectation() {
    let (store, _dir) = setup_store(&[("all_row1", "{}")]);

    store.save_expectation("all_row1", &json!({"v": 1})).unwrap();
    store.save_expectation("all_row1", &json!({"v": 2})).unwrap();

    let bytes = store.load_expectation("all_row1").unwrap().unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({"v": 2}));
}

#[test]
fn test_no_tmp_files_after_save() {
    let (store, dir) = setup_store(&[("all_row1", "{}")]);

    store.save_expectation("all_row1", &json!({"v": 1})).unwrap();

    let temp_files = fs::read_dir(dir.path().join("expectations"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|s| s.ends_with(".tmp"))
                .unwrap_or(false)
        })
        .count();

    assert_eq!(temp_files, 0, "No .tmp files should remain after write");
}

#[test]
fn test_load_missing_response_is_not_found() {
    let (store, _dir) = setup_store(&[]);

    let err = store.load_response("all_row9").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound, "Should be NotFound error");
    assert_eq!(err.entity_id(), Some("all_row9"));
}

#[test]
fn test_save_for_unknown_case_is_not_found() {
    let (store, dir) = setup_store(&[]);

    let err = store.save_expectation("all_row9", &json!({})).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(!dir.path().join("expectations").exists());
}

#[test]
fn test_path_traversal_is_rejected() {
    let (store, _dir) = setup_store(&[("all_row1", "{}")]);

    let err = store.load_response("../responses/all_row1").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);

    let err = store.reset_expectation("..").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_missing_responses_directory_warns_with_path() {
    let capture = expectdiff_core::logging_facility::init_test_capture();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("casse");
    let store = FsCaseStore::new(&root);

    assert!(store.list_cases().unwrap().is_empty());

    let responses = root.join("responses").display().to_string();
    let warned = capture.count_events(|e| {
        e.level == tracing::Level::WARN && e.field("path") == Some(responses.as_str())
    });
    assert_eq!(warned, 1);
}

#[test]
fn test_empty_responses_directory_warns() {
    let capture = expectdiff_core::logging_facility::init_test_capture();
    let (store, dir) = setup_store(&[]);

    assert!(store.list_cases().unwrap().is_empty());

    let responses = dir.path().join("responses").display().to_string();
    let warned = capture.count_events(|e| {
        e.level == tracing::Level::WARN
            && e.field("path") == Some(responses.as_str())
            && e.field("message") == Some("no response files in store")
    });
    assert_eq!(warned, 1);
}
