pub mod dates;
pub mod term;
pub mod config;
pub mod error;
pub mod sampler;
pub mod aggregator;
pub mod summary;
pub mod normalizer;
pub mod export;
pub mod pipeline;


pub use dates::{days_between, parse_date, resolve_end, DateParseError};
pub use term::{Term, TermError};
pub use config::{AnchorDate, PipelineConfig, ReferenceYear, YearRange};
pub use error::PipelineError;
pub use sampler::{sample_active, sample_active_par, ActiveSample};
pub use aggregator::{age_on, to_age_samples, AgeSample};
pub use summary::{summarize_by_year, YearSummary};
pub use normalizer::{normalize, parse_records, RawTermRecord};
pub use export::{samples_to_json, write_samples_csv, write_summary_csv};
pub use pipeline::Pipeline;
