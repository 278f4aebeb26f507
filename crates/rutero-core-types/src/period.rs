//! Calendar month periods
//!
//! A `Period` is the key of a commission ledger record: one calendar month
//! in `YYYY-MM` form. Parsing validates the format strictly; the month
//! window (first to last day, inclusive) is derived, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a `Period`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// Input does not match `YYYY-MM`
    #[error("period must match YYYY-MM, got: {input}")]
    Format { input: String },

    /// Month component is outside 01..=12
    #[error("period month out of range: {input}")]
    MonthOutOfRange { input: String },

    /// Year component is outside 0..=9999
    #[error("period year out of range: {input}")]
    YearOutOfRange { input: String },
}

/// One calendar month, `YYYY-MM`
///
/// Ordering is chronological, so sorting a list of periods descending
/// yields newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Construct from year and month components
    ///
    /// The year bound matches what `YYYY-MM` can express; it also keeps the
    /// month-window derivation inside chrono's representable date range.
    ///
    /// # Errors
    ///
    /// Returns `MonthOutOfRange` if `month` is not in 01..=12, or
    /// `YearOutOfRange` if `year` is not in 0..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(0..=9999).contains(&year) {
            return Err(PeriodError::YearOutOfRange {
                input: format!("{}-{:02}", year, month),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange {
                input: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month is validated at construction")
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("month is validated at construction")
            .pred_opt()
            .expect("first of a month always has a predecessor")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    /// Parse `YYYY-MM`
    ///
    /// The format check is strict: exactly seven ASCII characters, four
    /// digits, a dash, two digits. Months outside 01..=12 pass the format
    /// check but cannot produce a month window, so they are rejected too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(PeriodError::Format {
                input: s.to_string(),
            });
        }

        let year: i32 = s[..4].parse().map_err(|_| PeriodError::Format {
            input: s.to_string(),
        })?;
        let month: u32 = s[5..].parse().map_err(|_| PeriodError::Format {
            input: s.to_string(),
        })?;

        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
