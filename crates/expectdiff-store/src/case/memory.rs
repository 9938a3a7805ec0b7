//! In-memory case store

use super::naming::{sort_summaries, validate_case_name};
use super::{CaseStore, CaseSummary};
use crate::errors::{case_not_found, encoding_failed, Result};
use expectdiff_core::errors::{ExError, ExErrorKind};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Entries {
    responses: BTreeMap<String, Vec<u8>>,
    expectations: BTreeMap<String, Vec<u8>>,
}

/// Case store held in memory
#[derive(Debug, Default)]
pub struct MemoryCaseStore {
    entries: Mutex<Entries>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a response.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the case name is unusable.
    pub fn insert_response(&self, case: &str, body: impl Into<Vec<u8>>) -> Result<()> {
        validate_case_name(case)?;
        self.lock()?.responses.insert(case.to_string(), body.into());
        Ok(())
    }

    /// Store raw expectation bytes as-is, bypassing serialization
    ///
    /// # Errors
    ///
    /// `NotFound` if the case has no response.
    pub fn insert_raw_expectation(&self, case: &str, body: impl Into<Vec<u8>>) -> Result<()> {
        let mut entries = self.lock()?;
        if !entries.responses.contains_key(case) {
            return Err(case_not_found("insert_raw_expectation", case));
        }
        entries.expectations.insert(case.to_string(), body.into());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>> {
        self.entries.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("memory_store_lock")
                .with_message("case store lock poisoned")
        })
    }
}

impl CaseStore for MemoryCaseStore {
    fn list_cases(&self) -> Result<Vec<CaseSummary>> {
        let entries = self.lock()?;
        let mut cases: Vec<_> = entries
            .responses
            .keys()
            .map(|name| CaseSummary::new(name.clone(), entries.expectations.contains_key(name)))
            .collect();
        sort_summaries(&mut cases);
        Ok(cases)
    }

    fn load_response(&self, case: &str) -> Result<Vec<u8>> {
        validate_case_name(case)?;
        self.lock()?
            .responses
            .get(case)
            .cloned()
            .ok_or_else(|| case_not_found("load_response", case))
    }

    fn load_expectation(&self, case: &str) -> Result<Option<Vec<u8>>> {
        validate_case_name(case)?;
        Ok(self.lock()?.expectations.get(case).cloned())
    }

    fn save_expectation(&self, case: &str, expectation: &Value) -> Result<()> {
        validate_case_name(case)?;
        let body = serde_json::to_vec_pretty(expectation)
            .map_err(|e| encoding_failed("save_expectation", case, e))?;
        let mut entries = self.lock()?;
        if !entries.responses.contains_key(case) {
            return Err(case_not_found("save_expectation", case));
        }
        entries.expectations.insert(case.to_string(), body);
        Ok(())
    }

    fn reset_expectation(&self, case: &str) -> Result<bool> {
        validate_case_name(case)?;
        Ok(self.lock()?.expectations.remove(case).is_some())
    }
}
