//! Year-range aggregation
//!
//! Collapses a year range into one value per entity and attribute: the mean
//! of the normalized values for the years that have one.

use placesim_core::{AttributeId, EntityId, EntityTable, YearRange};

use crate::normalize::Normalizer;

/// Outcome of aggregating one attribute for one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    /// Mean over `years` contributing years
    Value { mean: f64, years: usize },
    /// No year in the range produced a value, or the mean is not finite
    Excluded,
}

impl Aggregate {
    pub fn value(&self) -> Option<f64> {
        match self {
            Aggregate::Value { mean, .. } => Some(*mean),
            Aggregate::Excluded => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Aggregate::Excluded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("invalid year range {start}-{end}")]
    InvalidRange { start: u16, end: u16 },
}

impl From<AggregateError> for placesim_core::Error {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::InvalidRange { start, end } => placesim_core::Error::InvalidRange {
                start: start as i64,
                end: end as i64,
            },
        }
    }
}

/// Mean-of-range aggregator over one entity table.
#[derive(Debug, Clone, Copy)]
pub struct YearAggregator<'a> {
    normalizer: Normalizer<'a>,
}

impl<'a> YearAggregator<'a> {
    pub fn new(table: &'a EntityTable) -> Self {
        Self {
            normalizer: Normalizer::new(table),
        }
    }

    pub fn aggregate(
        &self,
        id: EntityId,
        attribute: AttributeId,
        normalize_by: AttributeId,
        range: YearRange,
    ) -> Result<Aggregate, AggregateError> {
        if !range.is_ordered() {
            return Err(AggregateError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        let (sum, years) = range
            .years()
            .filter_map(|year| {
                self.normalizer
                    .normalize(id, attribute, normalize_by, year)
                    .ok()
            })
            .fold((0.0f64, 0usize), |(sum, n), v| (sum + v, n + 1));

        let mean = sum / years as f64;
        if years == 0 || !mean.is_finite() {
            return Ok(Aggregate::Excluded);
        }

        Ok(Aggregate::Value { mean, years })
    }
}
