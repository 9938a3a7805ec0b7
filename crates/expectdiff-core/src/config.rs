//! Tool configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! [format]
//! separator = "\n"
//! max_len = 32767
//! truncation_marker = "..."
//!
//! [diff]
//! array_policy = "strict"   # or "index_aligned"
//!
//! [expectation]
//! redaction_markers = ["[image hidden]"]
//!
//! [store]
//! root = "cases"
//! ```

use crate::diff::format::FormatOptions;
use crate::diff::model::{ArrayPolicy, DiffOptions};
use crate::errors::{io_error, DiffToolError, ExError};
use crate::expectation::default_markers;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub format: FormatOptions,
    pub diff: DiffSection,
    pub expectation: ExpectationSection,
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSection {
    pub array_policy: ArrayPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectationSection {
    pub redaction_markers: Vec<String>,
}

impl Default for ExpectationSection {
    fn default() -> Self {
        Self {
            redaction_markers: default_markers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub root: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("cases"),
        }
    }
}

impl ToolConfig {
    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed TOML, unknown keys or wrong types.
    pub fn from_toml_str(text: &str) -> Result<Self, DiffToolError> {
        toml::from_str(text).map_err(|e| DiffToolError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ExError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            io_error("load_config", e).with_entity_id(path.display().to_string())
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| ExError::from(e).with_entity_id(path.display().to_string()))
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            array_policy: self.diff.array_policy,
        }
    }
}
