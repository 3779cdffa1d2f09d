use crate::aggregator::AgeSample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-year statistics over age samples, as plotted by the chart layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    /// Number of members serving on the anchor date
    pub count: usize,
    /// Arithmetic mean of the approximate ages
    pub mean_age: f64,
}

/// Groups samples by year and computes count and mean age.
///
/// Years without samples are omitted. Output is sorted by year.
pub fn summarize_by_year(samples: &[AgeSample]) -> Vec<YearSummary> {
    let mut totals: BTreeMap<i32, (usize, i64)> = BTreeMap::new();
    for sample in samples {
        let entry = totals.entry(sample.year).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += sample.age;
    }

    totals
        .into_iter()
        .map(|(year, (count, age_sum))| YearSummary {
            year,
            count,
            mean_age: age_sum as f64 / count as f64,
        })
        .collect()
}
