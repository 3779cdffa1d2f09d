//! Tenure Ages Batch Binary
//!
//! Run with: `cargo run --bin tenure-ages -- records.json [--summary | --json]`
//!
//! Reads normalized membership records and writes one `(year, age)` row per
//! member serving on each reference year's anchor date.

use std::io::{self, Write};
use tenure_ages::{
    parse_records, samples_to_json, summarize_by_year, write_samples_csv, write_summary_csv,
    Pipeline, PipelineConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Samples,
    Summary,
    Json,
}

fn usage() -> String {
    "usage: tenure-ages <records.json> [--summary | --json]".to_string()
}

/// Parses `<records.json> [--summary | --json]`; exactly one path is accepted.
fn parse_args<I>(args: I) -> Result<(String, OutputFormat), String>
where
    I: IntoIterator<Item = String>,
{
    let mut input_path = None;
    let mut format = OutputFormat::Samples;
    for arg in args {
        match arg.as_str() {
            "--summary" => format = OutputFormat::Summary,
            "--json" => format = OutputFormat::Json,
            flag if flag.starts_with("--") => return Err(usage()),
            _ if input_path.is_some() => return Err(usage()),
            path => input_path = Some(path.to_string()),
        }
    }
    let input_path = input_path.ok_or_else(usage)?;
    Ok((input_path, format))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=tenure_ages=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let (input_path, format) = parse_args(std::env::args().skip(1))?;

    // Year range, anchor and fallback come from TENURE_* variables
    let config = PipelineConfig::from_env()?;
    tracing::info!(
        "Sampling {}-{} on {:02}-{:02}, open terms end {}",
        config.year_range.start,
        config.year_range.end,
        config.anchor.month,
        config.anchor.day,
        config.missing_end_fallback
    );

    let json = std::fs::read_to_string(&input_path)?;
    let records = parse_records(&json)?;
    let pipeline = Pipeline::new(config)?;
    let samples = pipeline.run(&records)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Samples => write_samples_csv(&mut out, &samples)?,
        OutputFormat::Summary => write_summary_csv(&mut out, &summarize_by_year(&samples))?,
        OutputFormat::Json => writeln!(out, "{}", samples_to_json(&samples)?)?,
    }

    Ok(())
}
