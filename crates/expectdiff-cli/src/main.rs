//! expectdiff CLI
//!
//! Command-line interface for comparing parser output against expectations

use clap::{Parser, Subcommand};
use expectdiff_core::errors::{ExError, ExErrorKind};
use expectdiff_core::logging_facility::{init, Profile};
use expectdiff_core::verdict::{EXIT_FAILURE, EXIT_INVALID_JSON};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "expectdiff")]
#[command(
    about = "expectdiff - Structural comparison of parser output against expectations",
    long_about = None
)]
struct Cli {
    /// Emit JSON structured logs on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Emit human-readable debug logs on stderr
    #[arg(long, short, global = true, conflicts_with = "log_json")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two JSON files
    Compare(commands::compare::CompareArgs),
    /// Review one case or every case in a store
    Review(commands::review::ReviewArgs),
    /// Maintain saved expectations
    Expect(commands::expect::ExpectArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else if cli.verbose {
        Profile::Development
    } else {
        Profile::Silent
    });

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Review(args) => commands::review::execute(args),
        Commands::Expect(args) => commands::expect::execute(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code_for(e.as_ref()));
        }
    }
}

/// Rejected input text keeps its own exit code; everything else is a failure
fn exit_code_for(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<ExError>() {
        Some(ex) if ex.kind() == ExErrorKind::InvalidJson => EXIT_INVALID_JSON,
        _ => EXIT_FAILURE,
    }
}
