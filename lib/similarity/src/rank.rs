//! Similarity ranker
//!
//! Scores every candidate of the reference's entity table against the
//! reference and keeps the K nearest. Distance is the absolute difference
//! for one attribute and the Euclidean distance for several; ties are
//! broken by ascending entity id.

use ordered_float::OrderedFloat;
use placesim_core::{AttributeId, EntityId, EntityTable, Error, Result, Year, YearRange};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::aggregate::{Aggregate, AggregateError, YearAggregator};
use crate::distance::{contributions, euclidean_distance};

/// Aggregated values of one entity, in attribute order
pub type Profile = SmallVec<[f64; 4]>;

/// One ranked candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntity {
    pub id: EntityId,
    pub distance: f64,
    /// Aggregated values, in attribute order
    pub values: Profile,
    /// Absolute difference to the reference per attribute
    pub contributions: Profile,
}

/// Ranked candidates, nearest first
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub reference: EntityId,
    pub attributes: Vec<AttributeId>,
    pub reference_values: Profile,
    pub entities: Vec<RankedEntity>,
    /// Size of the candidate pool after exclusions
    pub candidates_count: usize,
}

impl RankedResult {
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// What to rank: a reference, the attributes to compare on and how to
/// aggregate them.
#[derive(Debug, Clone, Copy)]
pub struct RankRequest<'q> {
    pub reference: EntityId,
    pub attributes: &'q [AttributeId],
    pub normalize_by: AttributeId,
    pub range: YearRange,
    pub count: usize,
}

/// Ranks the entities of one table.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker<'a> {
    table: &'a EntityTable,
    aggregator: YearAggregator<'a>,
}

impl<'a> SimilarityRanker<'a> {
    pub fn new(table: &'a EntityTable) -> Self {
        Self {
            table,
            aggregator: YearAggregator::new(table),
        }
    }

    /// Single-attribute ranking over a year range.
    pub fn rank_single(
        &self,
        reference: EntityId,
        attribute: AttributeId,
        normalize_by: AttributeId,
        range: YearRange,
        count: usize,
    ) -> Result<RankedResult> {
        self.rank(&RankRequest {
            reference,
            attributes: &[attribute],
            normalize_by,
            range,
            count,
        })
    }

    /// Multi-attribute ranking for one year.
    pub fn rank_multi(
        &self,
        reference: EntityId,
        attributes: &[AttributeId],
        normalize_by: AttributeId,
        year: Year,
        count: usize,
    ) -> Result<RankedResult> {
        self.rank(&RankRequest {
            reference,
            attributes,
            normalize_by,
            range: YearRange::single(year),
            count,
        })
    }

    pub fn rank(&self, request: &RankRequest<'_>) -> Result<RankedResult> {
        let reference_values = match self.profile(request.reference, request)? {
            Some(values) => values,
            None => return Err(self.unavailable(request)),
        };

        let ids: Vec<EntityId> = self
            .table
            .row_ids()
            .filter(|id| *id != request.reference)
            .collect();

        let scored: Vec<Option<RankedEntity>> = ids
            .par_iter()
            .map(|id| -> std::result::Result<Option<RankedEntity>, AggregateError> {
                let Some(values) = self.profile(*id, request)? else {
                    return Ok(None);
                };
                Ok(Some(RankedEntity {
                    id: *id,
                    distance: euclidean_distance(&reference_values, &values),
                    contributions: contributions(&reference_values, &values).collect(),
                    values,
                }))
            })
            .collect::<std::result::Result<_, _>>()?;

        let mut pool: Vec<RankedEntity> = scored.into_iter().flatten().collect();
        let candidates_count = pool.len();
        if candidates_count == 0 {
            return Err(Error::NoCandidates);
        }

        if pool.len() > request.count {
            pool.select_nth_unstable_by(request.count, nearest_first);
            pool.truncate(request.count);
        }
        pool.sort_by(nearest_first);

        Ok(RankedResult {
            reference: request.reference,
            attributes: request.attributes.to_vec(),
            reference_values,
            entities: pool,
            candidates_count,
        })
    }

    /// Aggregated values for every requested attribute, `None` when any of
    /// them is excluded.
    fn profile(
        &self,
        id: EntityId,
        request: &RankRequest<'_>,
    ) -> std::result::Result<Option<Profile>, AggregateError> {
        let mut values = Profile::with_capacity(request.attributes.len());
        for attribute in request.attributes {
            match self
                .aggregator
                .aggregate(id, *attribute, request.normalize_by, request.range)?
            {
                Aggregate::Value { mean, .. } => values.push(mean),
                Aggregate::Excluded => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn unavailable(&self, request: &RankRequest<'_>) -> Error {
        let attribute = request
            .attributes
            .iter()
            .copied()
            .find(|attribute| {
                matches!(
                    self.aggregator.aggregate(
                        request.reference,
                        *attribute,
                        request.normalize_by,
                        request.range
                    ),
                    Ok(Aggregate::Excluded)
                )
            })
            .unwrap_or(request.normalize_by);

        Error::ReferenceUnavailable {
            entity: request.reference,
            attribute,
        }
    }
}

fn nearest_first(a: &RankedEntity, b: &RankedEntity) -> Ordering {
    OrderedFloat(a.distance)
        .cmp(&OrderedFloat(b.distance))
        .then(a.id.cmp(&b.id))
}
