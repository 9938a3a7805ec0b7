//! expectdiff Store - where parser responses and expectations live
//!
//! Provides:
//! - The `CaseStore` interface used by review and batch commands
//! - A filesystem store with atomic, pretty-printed expectation writes
//! - An in-memory store for tests and embedding

pub mod case;
pub mod errors;

// Re-export key types
pub use case::{CaseStore, CaseSummary, FsCaseStore, MemoryCaseStore};
pub use errors::Result;
