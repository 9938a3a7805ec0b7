//! Review cases in a store

use super::{load_config, OutputFormat};
use clap::Args;
use expectdiff_core::{FormatOptions, Verdict};
use expectdiff_engine::{
    review_all, review_case, BatchReport, CaseOutcome, CaseReport, ReviewOptions,
};
use expectdiff_store::FsCaseStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Case store root (defaults to `[store] root` from the config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Review a single case instead of the whole store
    #[arg(long)]
    pub case: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ReviewArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let root = args.store.unwrap_or_else(|| config.store.root.clone());
    let store = FsCaseStore::new(root);
    let options = ReviewOptions::from_config(&config);

    if let Some(case) = args.case {
        let report = review_case(&store, &case, &options)?;
        match args.format {
            OutputFormat::Text => print!("{}", render_case(&report)),
            OutputFormat::Cell => println!("{}", report.verdict.cell_text(&config.format)?),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        return Ok(report.exit_code());
    }

    let report = review_all(&store, &options)?;
    match args.format {
        OutputFormat::Text | OutputFormat::Cell => {
            print!("{}", render_batch(&report, &config.format)?)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(report.exit_code())
}

fn render_case(report: &CaseReport) -> String {
    let origin = if report.has_expectation {
        "saved expectation"
    } else {
        "no saved expectation, response used as expectation"
    };
    format!("Case {} ({})\n{}", report.case, origin, report.verdict.report())
}

/// One line per case, then a summary line
fn render_batch(
    report: &BatchReport,
    format: &FormatOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();
    for outcome in &report.cases {
        let line = match outcome {
            CaseOutcome::Reviewed(case) => {
                let tag = match case.verdict {
                    Verdict::Match => "OK",
                    Verdict::Mismatch { .. } => "DIFF",
                    Verdict::InvalidJson { .. } => "INVALID",
                    Verdict::Skipped { .. } => "SKIP",
                };
                format!("[{}] {}: {}", tag, case.case, case.verdict.cell_text(format)?)
            }
            CaseOutcome::Failed { case, error, .. } => format!("[FAIL] {}: {}", case, error),
        };
        out.push_str(&line);
        out.push('\n');
    }
    let s = &report.summary;
    out.push_str(&format!(
        "run {}: {} cases, {} matched, {} mismatched, {} invalid, {} skipped, {} failed\n",
        report.run_id, s.total, s.matched, s.mismatched, s.invalid, s.skipped, s.failed
    ));
    Ok(out)
}
