use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

pub type Year = u16;

/// First year covered by the source data (inclusive)
pub const MIN_YEAR: Year = 1967;
/// Last year covered by the source data (inclusive)
pub const MAX_YEAR: Year = 2016;
/// Number of year slots per series
pub const YEAR_SPAN: usize = (MAX_YEAR - MIN_YEAR) as usize + 1;

pub fn is_supported_year(year: i64) -> bool {
    (MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year)
}

/// Offset of `year` inside a series, `None` outside the covered span.
pub fn year_offset(year: Year) -> Option<usize> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Some((year - MIN_YEAR) as usize)
    } else {
        None
    }
}

/// Inclusive year span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    /// Build a range, rejecting `start > end` and years outside the span.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        for year in [start, end] {
            if !is_supported_year(year) {
                return Err(Error::YearOutOfRange(year));
            }
        }
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self {
            start: start as Year,
            end: end as Year,
        })
    }

    pub fn single(year: Year) -> Self {
        Self { start: year, end: year }
    }

    pub fn full() -> Self {
        Self {
            start: MIN_YEAR,
            end: MAX_YEAR,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        if self.is_ordered() {
            (self.end - self.start) as usize + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
