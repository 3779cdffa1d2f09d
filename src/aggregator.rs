//! Age Aggregator
//!
//! Turns active samples into `(year, age)` pairs for the chart layer. No
//! statistics are computed here; grouping and averaging belong to the
//! consumer (see [`crate::summary`]).

use crate::dates::days_between;
use crate::sampler::ActiveSample;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days per year in the age approximation.
pub const DAYS_PER_YEAR: i64 = 365;

/// A single (year, age) observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeSample {
    pub year: i32,
    pub age: i64,
}

/// Approximate age in whole years on `on`.
///
/// Uses the formula: floor(days_between(birth, on) / 365)
///
/// Leap days are not accounted for, so the result can run ahead of the
/// calendar age for long spans. Existing charts depend on this exact value.
/// A date before `birth` gives a negative age.
///
/// # Examples
/// ```
/// use tenure_ages::aggregator::age_on;
/// use chrono::NaiveDate;
///
/// let birth = NaiveDate::from_ymd_opt(1950, 6, 15).unwrap();
/// let anchor = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// assert_eq!(age_on(birth, anchor), 69);
/// ```
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> i64 {
    days_between(birth, on).div_euclid(DAYS_PER_YEAR)
}

impl From<&ActiveSample<'_>> for AgeSample {
    fn from(sample: &ActiveSample<'_>) -> Self {
        AgeSample {
            year: sample.year.year,
            age: age_on(sample.term.birth_date(), sample.year.anchor),
        }
    }
}

/// Converts each active sample into an age sample, preserving order.
pub fn to_age_samples(active: &[ActiveSample<'_>]) -> Vec<AgeSample> {
    active.iter().map(AgeSample::from).collect()
}

/// Number of samples with a negative age (birth date after the anchor).
pub fn negative_age_count(samples: &[AgeSample]) -> usize {
    samples.iter().filter(|sample| sample.age < 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferenceYear;
    use crate::term::Term;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_reference_value() {
        assert_eq!(days_between(ymd(1950, 6, 15), ymd(2020, 1, 1)), 25402);
        assert_eq!(age_on(ymd(1950, 6, 15), ymd(2020, 1, 1)), 69);
    }

    #[test]
    fn test_age_ignores_leap_days() {
        // 36523 days; the calendar age is 99 but 36523 / 365 floors to 100
        assert_eq!(age_on(ymd(1900, 1, 2), ymd(2000, 1, 1)), 100);
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        assert_eq!(age_on(ymd(2001, 1, 1), ymd(2001, 12, 31)), 0);
        // Leap year: 365 days already counts as a year
        assert_eq!(age_on(ymd(2000, 1, 1), ymd(2000, 12, 31)), 1);
        assert_eq!(age_on(ymd(2001, 1, 1), ymd(2002, 1, 1)), 1);
        assert_eq!(age_on(ymd(2000, 1, 1), ymd(2000, 1, 1)), 0);
    }

    #[test]
    fn test_negative_age_passes_through() {
        // -152 days floors to -1
        assert_eq!(age_on(ymd(1980, 6, 1), ymd(1980, 1, 1)), -1);
        // -3653 days floors to -11, not -10
        assert_eq!(age_on(ymd(1990, 1, 1), ymd(1980, 1, 1)), -11);
    }

    #[test]
    fn test_to_age_samples_one_per_active() {
        let term = Term::new("Ada", ymd(1940, 1, 1), ymd(1980, 1, 1), ymd(1990, 1, 1)).unwrap();
        let active = vec![
            ActiveSample {
                year: ReferenceYear {
                    year: 1980,
                    anchor: ymd(1980, 1, 1),
                },
                term: &term,
            },
            ActiveSample {
                year: ReferenceYear {
                    year: 1980,
                    anchor: ymd(1980, 1, 1),
                },
                term: &term,
            },
        ];
        let samples = to_age_samples(&active);
        assert_eq!(
            samples,
            vec![
                AgeSample { year: 1980, age: 40 },
                AgeSample { year: 1980, age: 40 },
            ]
        );
    }

    #[test]
    fn test_negative_age_count() {
        let samples = vec![
            AgeSample { year: 1900, age: 40 },
            AgeSample { year: 1901, age: -2 },
            AgeSample { year: 1902, age: 0 },
        ];
        assert_eq!(negative_age_count(&samples), 1);
    }
}
