//! Similarity engine
//!
//! Entry point for callers: owns the dataset and exposes attribute listings
//! and the two similarity queries. Shared read-only across threads.

use placesim_core::{AttributeId, Dataset, Result};
use std::collections::BTreeSet;
use tracing::debug;

use crate::explain::SimilarResponse;
use crate::query::{MultiQuery, MultiRequest, SingleQuery, SingleRequest};
use crate::rank::{RankedResult, SimilarityRanker};
use crate::validate::QueryValidator;

#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    dataset: Dataset,
}

impl SimilarityEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn validator(&self) -> QueryValidator<'_> {
        QueryValidator::new(&self.dataset)
    }

    /// Attributes supported for the entity type with wire code `place_type`.
    pub fn list_supported_attributes(&self, place_type: i64) -> Result<BTreeSet<AttributeId>> {
        self.dataset
            .catalog()
            .attributes_for_code(place_type)
            .cloned()
    }

    /// Attributes supported by every entity type.
    pub fn list_common_attributes(&self) -> BTreeSet<AttributeId> {
        self.dataset.catalog().common_attributes().clone()
    }

    pub fn find_similar_single(&self, request: &SingleRequest) -> Result<RankedResult> {
        let query = self.validator().validate_single(request)?;
        self.run_single(&query)
    }

    pub fn find_similar_multi(&self, request: &MultiRequest) -> Result<RankedResult> {
        let query = self.validator().validate_multi(request)?;
        self.run_multi(&query)
    }

    pub fn explain_single(&self, request: &SingleRequest) -> Result<SimilarResponse> {
        self.find_similar_single(request)
            .map(|ranked| SimilarResponse::from_ranked(&ranked))
    }

    pub fn explain_multi(&self, request: &MultiRequest) -> Result<SimilarResponse> {
        self.find_similar_multi(request)
            .map(|ranked| SimilarResponse::from_ranked(&ranked))
    }

    /// Rank an already validated single-attribute query.
    pub fn run_single(&self, query: &SingleQuery) -> Result<RankedResult> {
        debug!(
            entity = %query.entity,
            entity_type = %query.entity_type,
            attribute = %query.attribute,
            normalize_by = %query.normalize_by,
            range = %query.range,
            count = query.count,
            "single-attribute similarity query"
        );

        let table = self.dataset.table(query.entity_type);
        let result = SimilarityRanker::new(table).rank_single(
            query.entity,
            query.attribute,
            query.normalize_by,
            query.range,
            query.count,
        )?;

        debug!(
            results = result.len(),
            candidates = result.candidates_count,
            "single-attribute similarity ranked"
        );
        Ok(result)
    }

    /// Rank an already validated multi-attribute query.
    pub fn run_multi(&self, query: &MultiQuery) -> Result<RankedResult> {
        debug!(
            entity = %query.entity,
            entity_type = %query.entity_type,
            attributes = ?query.attributes,
            normalize_by = %query.normalize_by,
            year = query.year,
            count = query.count,
            "multi-attribute similarity query"
        );

        let table = self.dataset.table(query.entity_type);
        let result = SimilarityRanker::new(table).rank_multi(
            query.entity,
            &query.attributes,
            query.normalize_by,
            query.year,
            query.count,
        )?;

        debug!(
            results = result.len(),
            candidates = result.candidates_count,
            "multi-attribute similarity ranked"
        );
        Ok(result)
    }
}
