use crate::dates::parse_date;
use crate::error::PipelineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive range of reference years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year (inclusive)
    pub start: i32,
    /// Last year (inclusive)
    pub end: i32,
}

impl YearRange {
    /// Creates a new YearRange.
    pub fn new(start: i32, end: i32) -> Self {
        YearRange { start, end }
    }

    /// Number of years covered; zero for an inverted range.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (i64::from(self.end) - i64::from(self.start) + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Month and day used to build each year's anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorDate {
    pub month: u32,
    pub day: u32,
}

impl AnchorDate {
    /// Creates a new AnchorDate. Validity is checked per year by [`AnchorDate::in_year`].
    pub fn new(month: u32, day: u32) -> Self {
        AnchorDate { month, day }
    }

    /// Parses an `MM-DD` string.
    pub fn parse(value: &str) -> Option<Self> {
        let (month, day) = value.trim().split_once('-')?;
        Some(AnchorDate {
            month: month.parse().ok()?,
            day: day.parse().ok()?,
        })
    }

    /// Builds the anchor date for `year`, or `None` if the month/day does not exist that year.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl Default for AnchorDate {
    fn default() -> Self {
        AnchorDate { month: 1, day: 1 }
    }
}

/// An integer year together with the date used to test activity in that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReferenceYear {
    pub year: i32,
    pub anchor: NaiveDate,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reference years to sample (default: 1850-2022)
    pub year_range: YearRange,
    /// Anchor month/day within each year (default: January 1)
    #[serde(default)]
    pub anchor: AnchorDate,
    /// End date substituted for terms still in progress (default: 2022-12-31)
    pub missing_end_fallback: NaiveDate,
    /// Sample years on the rayon thread pool (default: false)
    #[serde(default)]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            year_range: YearRange::new(1850, 2022),
            anchor: AnchorDate::default(),
            missing_end_fallback: NaiveDate::from_ymd_opt(2022, 12, 31)
                .expect("2022-12-31 is a valid date"),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Creates a new pipeline configuration
    pub fn new(year_range: YearRange, anchor: AnchorDate, missing_end_fallback: NaiveDate) -> Self {
        PipelineConfig {
            year_range,
            anchor,
            missing_end_fallback,
            parallel: false,
        }
    }

    /// Builds a configuration from `TENURE_*` environment variables, starting from defaults.
    ///
    /// Recognised variables:
    /// - `TENURE_YEAR_START`, `TENURE_YEAR_END`: integer years
    /// - `TENURE_ANCHOR`: `MM-DD`
    /// - `TENURE_FALLBACK_END`: `YYYY-MM-DD`
    /// - `TENURE_PARALLEL`: `true`/`false`/`1`/`0`
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PipelineConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PipelineConfig::default();

        if let Some(value) = lookup("TENURE_YEAR_START") {
            config.year_range.start = parse_year("TENURE_YEAR_START", &value)?;
        }
        if let Some(value) = lookup("TENURE_YEAR_END") {
            config.year_range.end = parse_year("TENURE_YEAR_END", &value)?;
        }
        if let Some(value) = lookup("TENURE_ANCHOR") {
            config.anchor = AnchorDate::parse(&value).ok_or_else(|| {
                PipelineError::InvalidConfig(format!("TENURE_ANCHOR must be MM-DD, got '{}'", value))
            })?;
        }
        if let Some(value) = lookup("TENURE_FALLBACK_END") {
            config.missing_end_fallback = parse_date(&value).map_err(|e| {
                PipelineError::InvalidConfig(format!("TENURE_FALLBACK_END: {}", e))
            })?;
        }
        if let Some(value) = lookup("TENURE_PARALLEL") {
            config.parallel = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(PipelineError::InvalidConfig(format!(
                        "TENURE_PARALLEL must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the year range is non-empty and the anchor exists in every year.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.reference_years().map(|_| ())
    }

    /// Generates one ReferenceYear per year in the configured range, ascending.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` if the range is inverted or the
    /// anchor month/day is not a real date in some year (e.g. February 29).
    pub fn reference_years(&self) -> Result<Vec<ReferenceYear>, PipelineError> {
        if self.year_range.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "year range start {} is after end {}",
                self.year_range.start, self.year_range.end
            )));
        }

        (self.year_range.start..=self.year_range.end)
            .map(|year| {
                self.anchor
                    .in_year(year)
                    .map(|anchor| ReferenceYear { year, anchor })
                    .ok_or_else(|| {
                        PipelineError::InvalidConfig(format!(
                            "anchor {:02}-{:02} is not a valid date in {}",
                            self.anchor.month, self.anchor.day, year
                        ))
                    })
            })
            .collect()
    }
}

fn parse_year(name: &str, value: &str) -> Result<i32, PipelineError> {
    value.trim().parse::<i32>().map_err(|_| {
        PipelineError::InvalidConfig(format!("{} must be an integer year, got '{}'", name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.year_range, YearRange::new(1850, 2022));
        assert_eq!(config.anchor, AnchorDate::new(1, 1));
        assert_eq!(
            config.missing_end_fallback,
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_years_are_contiguous_and_anchored() {
        let config = PipelineConfig::new(
            YearRange::new(1979, 1981),
            AnchorDate::new(7, 4),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
        );
        let years = config.reference_years().unwrap();
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].year, 1979);
        assert_eq!(years[0].anchor, NaiveDate::from_ymd_opt(1979, 7, 4).unwrap());
        assert_eq!(years[2].year, 1981);
        assert_eq!(years[2].anchor, NaiveDate::from_ymd_opt(1981, 7, 4).unwrap());
    }

    #[test]
    fn test_single_year_range() {
        let range = YearRange::new(2000, 2000);
        assert_eq!(range.len(), 1);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let mut config = PipelineConfig::default();
        config.year_range = YearRange::new(2022, 1850);
        assert!(config.year_range.is_empty());
        assert!(matches!(
            config.reference_years(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_leap_day_anchor_rejected() {
        let mut config = PipelineConfig::default();
        config.anchor = AnchorDate::new(2, 29);
        config.year_range = YearRange::new(2000, 2001);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("2001"));
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!(AnchorDate::parse("07-04"), Some(AnchorDate::new(7, 4)));
        assert_eq!(AnchorDate::parse("1-1"), Some(AnchorDate::new(1, 1)));
        assert_eq!(AnchorDate::parse("jan-1"), None);
        assert_eq!(AnchorDate::parse("0101"), None);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            ("TENURE_YEAR_START", "1900"),
            ("TENURE_YEAR_END", "1950"),
            ("TENURE_ANCHOR", "06-30"),
            ("TENURE_FALLBACK_END", "1950-12-31T00:00:00Z"),
            ("TENURE_PARALLEL", "true"),
        ]))
        .unwrap();
        assert_eq!(config.year_range, YearRange::new(1900, 1950));
        assert_eq!(config.anchor, AnchorDate::new(6, 30));
        assert_eq!(
            config.missing_end_fallback,
            NaiveDate::from_ymd_opt(1950, 12, 31).unwrap()
        );
        assert!(config.parallel);
    }

    #[test]
    fn test_from_lookup_extreme_years_rejected() {
        let result = PipelineConfig::from_lookup(lookup_from(&[
            ("TENURE_YEAR_START", "-2147483648"),
            ("TENURE_YEAR_END", "2147483647"),
        ]));
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_full_i32_year_range_len() {
        let range = YearRange::new(i32::MIN, i32::MAX);
        assert!(!range.is_empty());
        assert_eq!(range.len() as u64, 1u64 << 32);
        assert_eq!(YearRange::new(i32::MAX, i32::MIN).len(), 0);
    }

    #[test]
    fn test_from_lookup_empty_gives_defaults() {
        let config = PipelineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = PipelineConfig::from_lookup(lookup_from(&[("TENURE_YEAR_START", "eighteen")]));
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));

        let result = PipelineConfig::from_lookup(lookup_from(&[("TENURE_PARALLEL", "maybe")]));
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));

        let result = PipelineConfig::from_lookup(lookup_from(&[("TENURE_FALLBACK_END", "soon")]));
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let json = r#"{
            "year_range": {"start": 1850, "end": 2022},
            "missing_end_fallback": "2022-12-31"
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }
}
