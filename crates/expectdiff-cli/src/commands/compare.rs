//! Compare two JSON files

use super::{load_config, OutputFormat};
use clap::Args;
use expectdiff_core::compare_bytes;
use expectdiff_core::diff::ArrayPolicy;
use expectdiff_core::errors::io_error;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Parser output
    pub actual: PathBuf,

    /// Expected result
    pub expected: PathBuf,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Separator between differences in cell output
    #[arg(long)]
    pub separator: Option<String>,

    /// Maximum length of cell output, in chars
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Compare arrays of different lengths element by element
    #[arg(long)]
    pub index_aligned: bool,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(separator) = args.separator {
        config.format.separator = separator;
    }
    if let Some(max_len) = args.max_len {
        config.format.max_len = max_len;
    }
    if args.index_aligned {
        config.diff.array_policy = ArrayPolicy::IndexAligned;
    }

    let actual = std::fs::read(&args.actual)
        .map_err(|e| io_error("read_actual", e).with_entity_id(args.actual.display().to_string()))?;
    let expected = std::fs::read(&args.expected).map_err(|e| {
        io_error("read_expected", e).with_entity_id(args.expected.display().to_string())
    })?;

    let verdict = compare_bytes(&actual, &expected, &config.diff_options());

    match args.format {
        OutputFormat::Text => print!("{}", verdict.report()),
        OutputFormat::Cell => println!("{}", verdict.cell_text(&config.format)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
    }

    Ok(verdict.exit_code())
}
