//! Case storage
//!
//! A case is one parser response plus, optionally, an operator-reviewed
//! expectation for it. Provides:
//! - The `CaseStore` interface passed explicitly to review commands
//! - Filesystem layout with atomic writes
//! - In-memory storage
//! - Case naming rules (request numbers, safe names)

mod atomic;
mod fs_store;
mod memory;
mod naming;

pub use fs_store::FsCaseStore;
pub use memory::MemoryCaseStore;
pub use naming::{request_number, sort_summaries, validate_case_name};

use crate::errors::Result;
use serde_json::Value;

/// Listing entry for one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSummary {
    pub name: String,
    /// First run of ASCII digits in the name, 0 if none
    pub number: u64,
    pub has_expectation: bool,
}

impl CaseSummary {
    pub fn new(name: impl Into<String>, has_expectation: bool) -> Self {
        let name = name.into();
        Self {
            number: request_number(&name),
            name,
            has_expectation,
        }
    }
}

/// Storage for responses and expectations.
///
/// Implementations return `NotFound` for a case without a response and
/// `InvalidInput` for names that cannot be mapped to storage.
pub trait CaseStore {
    /// All cases, ordered by request number then name
    fn list_cases(&self) -> Result<Vec<CaseSummary>>;

    /// Raw response bytes for a case
    fn load_response(&self, case: &str) -> Result<Vec<u8>>;

    /// Raw expectation bytes, or `None` if no expectation was saved
    fn load_expectation(&self, case: &str) -> Result<Option<Vec<u8>>>;

    /// Persist an expectation, replacing any previous one
    fn save_expectation(&self, case: &str, expectation: &Value) -> Result<()>;

    /// Remove a saved expectation. Returns whether one existed.
    fn reset_expectation(&self, case: &str) -> Result<bool>;
}
