//! Request validation
//!
//! Runs a fixed sequence of checks against the catalog and tables and
//! reports every failure at once, keyed by request field.

use ahash::AHashSet;
use placesim_core::{
    year, AttributeId, Dataset, EntityId, EntityType, Error, FieldErrors, Result, Year, YearRange,
};

use crate::query::{MultiQuery, MultiRequest, SingleQuery, SingleRequest};

const PLACE_TYPE_REASON: &str =
    "Unsupported place type, use 0 (for state), 1 (for county) and 2 (for cities)";
const YEAR_REASON: &str = "Only years between 1967 and 2016 are supported (inclusive)";

/// Validates raw requests against a dataset.
#[derive(Debug, Clone, Copy)]
pub struct QueryValidator<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryValidator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn validate_single(&self, request: &SingleRequest) -> Result<SingleQuery> {
        let mut errors = FieldErrors::new();

        let entity_type = self.check_place_type(request.place_type, &mut errors);
        if let Some(entity_type) = entity_type {
            if !self.dataset.catalog().supports(entity_type, request.attribute) {
                errors.add("attribute", "Unsupported attribute");
            }
            self.check_normalize_by(entity_type, request.normalize_by, &mut errors);
            self.check_entity(entity_type, request.id, &mut errors);
        }

        let range = request.year_range;
        for bound in [range.start, range.end] {
            if !year::is_supported_year(bound) {
                errors.add("year_range", YEAR_REASON);
                break;
            }
        }
        if range.start > range.end {
            errors.add("year_range", "Start year must not be after end year");
        }

        let count = check_count(request.count, &mut errors);

        match (entity_type, count) {
            (Some(entity_type), Some(count)) if errors.is_empty() => Ok(SingleQuery {
                entity: request.id,
                entity_type,
                attribute: request.attribute,
                normalize_by: request.normalize_by,
                range: YearRange::new(range.start, range.end)?,
                count,
            }),
            _ => Err(Error::Validation(errors)),
        }
    }

    pub fn validate_multi(&self, request: &MultiRequest) -> Result<MultiQuery> {
        let mut errors = FieldErrors::new();

        let mut seen = AHashSet::new();
        let attributes: Vec<AttributeId> = request
            .attribute
            .iter()
            .copied()
            .filter(|attribute| seen.insert(*attribute))
            .collect();

        let entity_type = self.check_place_type(request.place_type, &mut errors);
        if attributes.is_empty() {
            errors.add("attribute", "At least one attribute is required");
        }
        if let Some(entity_type) = entity_type {
            for attribute in &attributes {
                if !self.dataset.catalog().supports(entity_type, *attribute) {
                    errors.add("attribute", format!("Unsupported attribute '{}'", attribute));
                }
            }
            self.check_normalize_by(entity_type, request.normalize_by, &mut errors);
            self.check_entity(entity_type, request.id, &mut errors);
        }

        if !year::is_supported_year(request.year) {
            errors.add("year", YEAR_REASON);
        }

        let count = check_count(request.count, &mut errors);

        match (entity_type, count) {
            (Some(entity_type), Some(count)) if errors.is_empty() => Ok(MultiQuery {
                entity: request.id,
                entity_type,
                attributes,
                normalize_by: request.normalize_by,
                year: request.year as Year,
                count,
            }),
            _ => Err(Error::Validation(errors)),
        }
    }

    fn check_place_type(&self, code: i64, errors: &mut FieldErrors) -> Option<EntityType> {
        match EntityType::from_code(code) {
            Ok(entity_type) => Some(entity_type),
            Err(_) => {
                errors.add("place_type", PLACE_TYPE_REASON);
                None
            }
        }
    }

    fn check_normalize_by(
        &self,
        entity_type: EntityType,
        normalize_by: AttributeId,
        errors: &mut FieldErrors,
    ) {
        if !self.dataset.catalog().supports(entity_type, normalize_by) {
            errors.add("normalize_by", "Unsupported attribute");
        }
    }

    fn check_entity(&self, entity_type: EntityType, id: EntityId, errors: &mut FieldErrors) {
        if !self.dataset.table(entity_type).exists(id) {
            errors.add("id", "Invalid place id");
        }
    }
}

fn check_count(count: i64, errors: &mut FieldErrors) -> Option<usize> {
    match usize::try_from(count) {
        Ok(count) if count >= 1 => Some(count),
        _ => {
            errors.add("count", "Count must be at least 1");
            None
        }
    }
}
