use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// One stint of service held by one person.
///
/// A person with several stints is represented by several Terms; they are
/// never merged. Fields are private so the `tenure_start <= tenure_end`
/// invariant checked by [`Term::new`] holds for every value in existence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Term {
    /// Identifier or display name of the member
    label: String,
    /// Date of birth
    birth_date: NaiveDate,
    /// First day of service (inclusive)
    tenure_start: NaiveDate,
    /// Last day of service (inclusive)
    tenure_end: NaiveDate,
}

impl Term {
    /// Creates a new Term.
    ///
    /// `birth_date` is not checked against the tenure; a birth date after the
    /// start of service yields negative ages downstream rather than an error.
    ///
    /// # Errors
    /// Returns `TermError::InvalidInterval` if `tenure_start > tenure_end`.
    pub fn new(
        label: impl Into<String>,
        birth_date: NaiveDate,
        tenure_start: NaiveDate,
        tenure_end: NaiveDate,
    ) -> Result<Self, TermError> {
        if tenure_start > tenure_end {
            return Err(TermError::InvalidInterval {
                start: tenure_start,
                end: tenure_end,
            });
        }

        Ok(Term {
            label: label.into(),
            birth_date,
            tenure_start,
            tenure_end,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn tenure_start(&self) -> NaiveDate {
        self.tenure_start
    }

    pub fn tenure_end(&self) -> NaiveDate {
        self.tenure_end
    }

    /// Returns true if `date` falls within the tenure, both bounds inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.tenure_start <= date && date <= self.tenure_end
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {})",
            self.label,
            self.tenure_start.format("%Y-%m-%d"),
            self.tenure_end.format("%Y-%m-%d")
        )
    }
}

/// Errors that can occur when creating a Term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Tenure starts after it ends
    InvalidInterval { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for TermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermError::InvalidInterval { start, end } => {
                write!(f, "Tenure start {} is after tenure end {}", start, end)
            }
        }
    }
}

impl std::error::Error for TermError {}
