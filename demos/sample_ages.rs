//! Age Sampling Example
//!
//! Demonstrates how to:
//! 1. Configure the reference years, anchor date and missing-end fallback
//! 2. Run a few raw membership records through the pipeline
//! 3. Summarize the age samples per year
//!
//! Run with: `cargo run --example sample_ages`

use chrono::NaiveDate;
use tenure_ages::{
    summarize_by_year, AnchorDate, Pipeline, PipelineConfig, RawTermRecord, YearRange,
};

fn main() {
    println!("Age Sampling Example\n");

    let config = PipelineConfig::new(
        YearRange::new(1979, 1991),
        AnchorDate::new(1, 1),
        NaiveDate::from_ymd_opt(1990, 12, 31).unwrap(),
    );
    println!(
        "Years: {} to {}, anchor {:02}-{:02}, open terms end {}\n",
        config.year_range.start,
        config.year_range.end,
        config.anchor.month,
        config.anchor.day,
        config.missing_end_fallback
    );

    let records = vec![
        RawTermRecord::new("Ada", "1940-01-01", "1980-01-01", Some("1990-01-01")),
        RawTermRecord::new("Grace", "1950-06-15T00:00:00Z", "1984-03-01T00:00:00Z", None),
        // Second stint for the same member, sampled on its own
        RawTermRecord::new("Ada", "1940-01-01", "1990-06-01", Some("1991-06-01")),
    ];

    let pipeline = Pipeline::new(config).expect("Failed to build pipeline");
    let samples = pipeline.run(&records).expect("Failed to run pipeline");

    println!("Samples:");
    for sample in &samples {
        println!("   {}: age {}", sample.year, sample.age);
    }

    println!("\nPer-year summary:");
    for summary in summarize_by_year(&samples) {
        println!(
            "   {}: {} serving, mean age {:.1}",
            summary.year, summary.count, summary.mean_age
        );
    }
}
