//! Explainability for ranked results
//!
//! Output structures that show, for each result, the aggregated values it
//! was compared on and how far each attribute was from the reference.

use ordered_float::OrderedFloat;
use placesim_core::{AttributeId, EntityId};
use serde::Serialize;

use crate::rank::{RankedEntity, RankedResult};

/// One attribute's number in a response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeValue {
    pub attribute: AttributeId,
    pub value: f64,
}

/// A ranked entity with per-attribute breakdown. Per-attribute lists keep
/// the request's attribute order.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult {
    pub id: EntityId,
    /// Distance to the reference (lower is more similar)
    pub distance: f64,
    /// Aggregated, normalized value per attribute
    pub values: Vec<AttributeValue>,
    /// Absolute difference to the reference per attribute
    pub explain: Vec<AttributeValue>,
}

impl ExplainedResult {
    pub fn from_ranked(ranked: &RankedEntity, attributes: &[AttributeId]) -> Self {
        Self {
            id: ranked.id,
            distance: ranked.distance,
            values: zip_attributes(attributes, &ranked.values),
            explain: zip_attributes(attributes, &ranked.contributions),
        }
    }

    pub fn explain_for(&self, attribute: AttributeId) -> Option<f64> {
        find_value(&self.explain, attribute)
    }
}

fn zip_attributes(attributes: &[AttributeId], values: &[f64]) -> Vec<AttributeValue> {
    attributes
        .iter()
        .zip(values)
        .map(|(attribute, value)| AttributeValue {
            attribute: *attribute,
            value: *value,
        })
        .collect()
}

fn find_value(values: &[AttributeValue], attribute: AttributeId) -> Option<f64> {
    values
        .iter()
        .find(|entry| entry.attribute == attribute)
        .map(|entry| entry.value)
}

/// Response body for the similarity endpoints
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse {
    pub reference: EntityId,
    pub reference_values: Vec<AttributeValue>,
    pub result: Vec<ExplainedResult>,
    pub stats: SimilarityStats,
}

impl SimilarResponse {
    pub fn from_ranked(ranked: &RankedResult) -> Self {
        Self {
            reference: ranked.reference,
            reference_values: zip_attributes(&ranked.attributes, &ranked.reference_values),
            result: ranked
                .entities
                .iter()
                .map(|entity| ExplainedResult::from_ranked(entity, &ranked.attributes))
                .collect(),
            stats: SimilarityStats::compute(ranked),
        }
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.result.iter().map(|r| r.id).collect()
    }

    pub fn reference_value(&self, attribute: AttributeId) -> Option<f64> {
        find_value(&self.reference_values, attribute)
    }
}

/// Summary statistics for a similarity query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Candidates left after exclusions
    pub candidates_count: usize,
    pub results_count: usize,
    pub mean_distance: f64,
    pub best_distance: f64,
    /// Attribute that differs most for the best result
    pub top_contributing_attribute: Option<AttributeId>,
}

impl SimilarityStats {
    pub fn compute(ranked: &RankedResult) -> Self {
        let Some(best) = ranked.entities.first() else {
            return Self {
                candidates_count: ranked.candidates_count,
                results_count: 0,
                mean_distance: 0.0,
                best_distance: 0.0,
                top_contributing_attribute: None,
            };
        };

        let results_count = ranked.entities.len();
        let mean_distance =
            ranked.entities.iter().map(|e| e.distance).sum::<f64>() / results_count as f64;

        let top_contributing_attribute = ranked
            .attributes
            .iter()
            .zip(best.contributions.iter())
            .max_by_key(|(_, contribution)| OrderedFloat(**contribution))
            .map(|(attribute, _)| *attribute);

        Self {
            candidates_count: ranked.candidates_count,
            results_count,
            mean_distance,
            best_distance: best.distance,
            top_contributing_attribute,
        }
    }
}
