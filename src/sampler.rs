//! Interval Sampler
//!
//! Determines, for each reference year, which terms are active on that year's
//! anchor date. Activity is inclusive at both ends of the tenure: a term that
//! starts or ends exactly on the anchor counts.
//!
//! Output order is year-major, then terms in input order. The sequential and
//! parallel entry points produce identical sequences.

use crate::config::ReferenceYear;
use crate::term::Term;
use rayon::prelude::*;

/// A term found active on a reference year's anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSample<'a> {
    pub year: ReferenceYear,
    pub term: &'a Term,
}

/// Collects the active terms for a single reference year, in input order.
fn active_in_year<'a>(
    terms: &'a [Term],
    year: ReferenceYear,
) -> impl Iterator<Item = ActiveSample<'a>> + 'a {
    terms
        .iter()
        .filter(move |term| term.is_active_on(year.anchor))
        .map(move |term| ActiveSample { year, term })
}

/// Samples active terms for every reference year.
///
/// Naive O(years × terms) scan; at the scale of a national legislature's
/// history this is tens of thousands of comparisons.
///
/// # Examples
/// ```
/// use tenure_ages::config::ReferenceYear;
/// use tenure_ages::sampler::sample_active;
/// use tenure_ages::term::Term;
/// use chrono::NaiveDate;
///
/// let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let terms = vec![Term::new("Ada", ymd(1940, 1, 1), ymd(1980, 1, 1), ymd(1990, 1, 1)).unwrap()];
/// let years: Vec<ReferenceYear> = (1979..=1991)
///     .map(|year| ReferenceYear { year, anchor: ymd(year, 1, 1) })
///     .collect();
///
/// let active = sample_active(&terms, &years);
/// assert_eq!(active.len(), 11);
/// assert_eq!(active[0].year.year, 1980);
/// ```
pub fn sample_active<'a>(terms: &'a [Term], years: &[ReferenceYear]) -> Vec<ActiveSample<'a>> {
    years
        .iter()
        .flat_map(|year| active_in_year(terms, *year))
        .collect()
}

/// Parallel variant of [`sample_active`], splitting work by reference year.
///
/// Returns exactly the same sequence as the sequential version.
pub fn sample_active_par<'a>(terms: &'a [Term], years: &[ReferenceYear]) -> Vec<ActiveSample<'a>> {
    years
        .par_iter()
        .flat_map_iter(|year| active_in_year(terms, *year))
        .collect()
}
