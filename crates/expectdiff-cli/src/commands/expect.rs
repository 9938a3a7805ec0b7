//! Expectation maintenance commands

use clap::{Args, Subcommand};
use expectdiff_core::errors::io_error;
use expectdiff_core::input::{decode_utf8, Side};
use expectdiff_engine::{reset_expectation, save_expectation};
use expectdiff_store::FsCaseStore;
use std::path::PathBuf;

use super::load_config;

#[derive(Debug, Args)]
pub struct ExpectArgs {
    #[command(subcommand)]
    pub command: ExpectCommand,

    /// Case store root (defaults to `[store] root` from the config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ExpectCommand {
    /// Save FILE as the expectation for CASE
    Set { case: String, file: PathBuf },
    /// Remove the saved expectation for CASE
    Reset { case: String },
}

pub fn execute(args: ExpectArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let store = FsCaseStore::new(args.store.unwrap_or_else(|| config.store.root.clone()));

    match args.command {
        ExpectCommand::Set { case, file } => {
            let bytes = std::fs::read(&file).map_err(|e| {
                io_error("read_expectation", e).with_entity_id(file.display().to_string())
            })?;
            let text = decode_utf8(Side::Expected, &bytes)
                .map_err(|e| e.with_entity_id(file.display().to_string()))?;
            save_expectation(&store, &case, text)?;
            println!("Saved expectation for {}", case);
        }
        ExpectCommand::Reset { case } => {
            if reset_expectation(&store, &case)? {
                println!("Removed expectation for {}", case);
            } else {
                println!("No saved expectation for {}", case);
            }
        }
    }
    Ok(0)
}
