//! Term Normalizer
//!
//! Decodes the JSON produced by the upstream membership query into typed
//! [`Term`]s. Two document shapes are accepted:
//!
//! - a flat array of records: `[{"label": ..., "birth_date": ..., "start": ..., "end": ...}]`
//! - a SPARQL result document: `{"results": {"bindings": [{"dob": {"value": ...}, ...}]}}`
//!
//! Column names used by the query (`personLabel`, `dob`, `startTime`,
//! `endTime`) are accepted as aliases.

use crate::dates::{parse_date, resolve_end};
use crate::error::PipelineError;
use crate::term::{Term, TermError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A membership record with date fields still in string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTermRecord {
    #[serde(alias = "personLabel", alias = "person", default)]
    pub label: String,
    #[serde(alias = "dob")]
    pub birth_date: String,
    #[serde(alias = "startTime")]
    pub start: String,
    /// Absent or empty while the member is still serving
    #[serde(alias = "endTime", default)]
    pub end: Option<String>,
}

impl RawTermRecord {
    /// Creates a new RawTermRecord.
    pub fn new(
        label: impl Into<String>,
        birth_date: impl Into<String>,
        start: impl Into<String>,
        end: Option<&str>,
    ) -> Self {
        RawTermRecord {
            label: label.into(),
            birth_date: birth_date.into(),
            start: start.into(),
            end: end.map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlDocument {
    results: SparqlResults,
}

fn binding_field(
    binding: &HashMap<String, SparqlValue>,
    names: &[&str],
) -> Option<String> {
    names
        .iter()
        .find_map(|name| binding.get(*name))
        .map(|v| v.value.clone())
}

fn required_field(
    index: usize,
    binding: &HashMap<String, SparqlValue>,
    names: &[&str],
) -> Result<String, PipelineError> {
    binding_field(binding, names).ok_or_else(|| {
        PipelineError::Input(format!(
            "binding {} is missing field '{}'",
            index, names[0]
        ))
    })
}

fn record_from_binding(
    index: usize,
    binding: &HashMap<String, SparqlValue>,
) -> Result<RawTermRecord, PipelineError> {
    Ok(RawTermRecord {
        label: binding_field(binding, &["label", "personLabel", "person"]).unwrap_or_default(),
        birth_date: required_field(index, binding, &["birth_date", "dob"])?,
        start: required_field(index, binding, &["start", "startTime"])?,
        end: binding_field(binding, &["end", "endTime"]),
    })
}

fn record_from_value(index: usize, value: serde_json::Value) -> Result<RawTermRecord, PipelineError> {
    serde_json::from_value(value)
        .map_err(|e| PipelineError::Input(format!("record {}: {}", index, e)))
}

/// Parses a JSON document into raw records, in document order.
///
/// # Errors
/// Returns `PipelineError::Input` if the document is neither a record array
/// nor a SPARQL result document, or a record lacks a required field. The
/// message names the index of the offending record.
pub fn parse_records(json: &str) -> Result<Vec<RawTermRecord>, PipelineError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let records = match document {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| record_from_value(index, item))
            .collect::<Result<Vec<_>, _>>()?,
        other if other.get("results").is_some() => {
            let doc: SparqlDocument = serde_json::from_value(other)?;
            doc.results
                .bindings
                .iter()
                .enumerate()
                .map(|(index, binding)| record_from_binding(index, binding))
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => {
            return Err(PipelineError::Input(
                "expected an array of records or a SPARQL result document".to_string(),
            ))
        }
    };

    debug!(record_count = records.len(), "parsed raw term records");
    Ok(records)
}

/// Converts one raw record into a Term.
///
/// # Errors
/// Returns `MalformedDate` or `InvalidInterval` tagged with `index`.
pub fn normalize_record(
    index: usize,
    record: &RawTermRecord,
    missing_end_fallback: NaiveDate,
) -> Result<Term, PipelineError> {
    let birth_date = parse_date(&record.birth_date)
        .map_err(|e| PipelineError::malformed_date(index, "birth_date", e))?;
    let start = parse_date(&record.start)
        .map_err(|e| PipelineError::malformed_date(index, "start", e))?;
    let end = match record.end.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => {
            Some(parse_date(value).map_err(|e| PipelineError::malformed_date(index, "end", e))?)
        }
    };
    let end = resolve_end(end, missing_end_fallback);

    trace!(record = index, label = %record.label, %start, %end, "normalized term");

    Term::new(record.label.clone(), birth_date, start, end).map_err(|err| match err {
        TermError::InvalidInterval { start, end } => PipelineError::InvalidInterval {
            record: index,
            label: record.label.clone(),
            start,
            end,
        },
    })
}

/// Converts raw records into Terms, halting on the first bad record.
///
/// # Errors
/// Returns the error for the first record that fails to normalize.
pub fn normalize(
    records: &[RawTermRecord],
    missing_end_fallback: NaiveDate,
) -> Result<Vec<Term>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record, missing_end_fallback))
        .collect()
}
