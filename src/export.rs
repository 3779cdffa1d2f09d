use crate::aggregator::AgeSample;
use crate::error::PipelineError;
use crate::summary::YearSummary;
use serde::Serialize;
use std::io::Write;

/// Writes `header` followed by one row per item. The header is written even
/// when `rows` is empty.
fn write_csv<W: Write, T: Serialize>(
    writer: W,
    header: &[&str],
    rows: &[T],
) -> Result<(), PipelineError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes age samples as CSV with a `year,age` header.
///
/// # Errors
/// Returns `PipelineError::Output` if the writer fails.
pub fn write_samples_csv<W: Write>(writer: W, samples: &[AgeSample]) -> Result<(), PipelineError> {
    write_csv(writer, &["year", "age"], samples)
}

/// Writes per-year summaries as CSV with a `year,count,mean_age` header.
///
/// # Errors
/// Returns `PipelineError::Output` if the writer fails.
pub fn write_summary_csv<W: Write>(
    writer: W,
    summaries: &[YearSummary],
) -> Result<(), PipelineError> {
    write_csv(writer, &["year", "count", "mean_age"], summaries)
}

/// Serializes age samples as a JSON array of `{"year", "age"}` objects.
pub fn samples_to_json(samples: &[AgeSample]) -> Result<String, PipelineError> {
    serde_json::to_string(samples).map_err(|e| PipelineError::Output(format!("JSON error: {}", e)))
}
