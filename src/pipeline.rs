//! Sampling pipeline
//!
//! Wires the three stages together: Normalizer → Sampler → Aggregator.
//! Each stage consumes immutable input and returns a new collection.

use crate::aggregator::{negative_age_count, to_age_samples, AgeSample};
use crate::config::{PipelineConfig, ReferenceYear};
use crate::error::PipelineError;
use crate::normalizer::{normalize, RawTermRecord};
use crate::sampler::{sample_active, sample_active_par};
use crate::term::Term;
use tracing::{debug, info, warn};

/// A validated pipeline ready to run over any batch of terms.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    years: Vec<ReferenceYear>,
}

impl Pipeline {
    /// Creates a pipeline, generating the reference years up front.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if the configuration is rejected.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let years = config.reference_years()?;
        debug!(
            first_year = config.year_range.start,
            last_year = config.year_range.end,
            anchor_month = config.anchor.month,
            anchor_day = config.anchor.day,
            fallback = %config.missing_end_fallback,
            "Pipeline: reference years generated"
        );
        Ok(Pipeline { config, years })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn reference_years(&self) -> &[ReferenceYear] {
        &self.years
    }

    /// Samples active terms and converts them to age samples.
    ///
    /// Negative ages (birth after anchor) are kept and reported with a warning.
    pub fn run_terms(&self, terms: &[Term]) -> Vec<AgeSample> {
        let active = if self.config.parallel {
            sample_active_par(terms, &self.years)
        } else {
            sample_active(terms, &self.years)
        };

        debug!(
            term_count = terms.len(),
            year_count = self.years.len(),
            active_count = active.len(),
            parallel = self.config.parallel,
            "Pipeline: sampled active terms"
        );

        let samples = to_age_samples(&active);

        let negative = negative_age_count(&samples);
        if negative > 0 {
            warn!(
                negative_count = negative,
                "Pipeline: samples with birth date after anchor date"
            );
        }

        samples
    }

    /// Normalizes raw records, then samples and ages them.
    ///
    /// # Errors
    /// Returns the first `MalformedDate` or `InvalidInterval` error; no samples
    /// are produced for a batch containing a bad record.
    pub fn run(&self, records: &[RawTermRecord]) -> Result<Vec<AgeSample>, PipelineError> {
        info!("Starting pipeline: {} records", records.len());

        let terms = normalize(records, self.config.missing_end_fallback)?;
        let samples = self.run_terms(&terms);

        info!(
            "Pipeline complete: {} samples across {} reference years",
            samples.len(),
            self.years.len()
        );

        Ok(samples)
    }
}
