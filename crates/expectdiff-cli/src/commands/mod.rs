//! Subcommand implementations.
//!
//! Each `execute` returns the process exit code on success.

pub mod compare;
pub mod expect;
pub mod review;

use clap::ValueEnum;
use expectdiff_core::ToolConfig;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Multi-line human-readable report
    Text,
    /// Single bounded line, as written to a spreadsheet cell
    Cell,
    /// Pretty-printed JSON
    Json,
}

/// Load `--config` if given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ToolConfig::load(path)?),
        None => Ok(ToolConfig::default()),
    }
}
