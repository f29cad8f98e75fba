//! Request and query types
//!
//! `*Request` types are the raw, deserializable shape handed over by the
//! HTTP layer. Optional fields take their defaults during deserialization.
//! `*Query` types are what the validator produces and the ranker consumes.

use placesim_core::{AttributeId, EntityId, EntityType, Year, YearRange, MAX_YEAR, MIN_YEAR};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNT: i64 = 2;

fn default_normalize_by() -> AttributeId {
    AttributeId::POPULATION
}

fn default_count() -> i64 {
    DEFAULT_COUNT
}

fn default_start() -> i64 {
    MIN_YEAR as i64
}

fn default_end() -> i64 {
    MAX_YEAR as i64
}

/// Raw year range; either bound may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRangeRequest {
    #[serde(default = "default_start")]
    pub start: i64,
    #[serde(default = "default_end")]
    pub end: i64,
}

impl Default for YearRangeRequest {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
        }
    }
}

/// Similar entities under one attribute, averaged over a year range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRequest {
    pub id: EntityId,
    pub place_type: i64,
    pub attribute: AttributeId,
    #[serde(default = "default_normalize_by")]
    pub normalize_by: AttributeId,
    #[serde(default)]
    pub year_range: YearRangeRequest,
    #[serde(default = "default_count")]
    pub count: i64,
}

impl SingleRequest {
    pub fn new(id: impl Into<EntityId>, place_type: i64, attribute: impl Into<AttributeId>) -> Self {
        Self {
            id: id.into(),
            place_type,
            attribute: attribute.into(),
            normalize_by: default_normalize_by(),
            year_range: YearRangeRequest::default(),
            count: DEFAULT_COUNT,
        }
    }

    pub fn normalize_by(mut self, attribute: impl Into<AttributeId>) -> Self {
        self.normalize_by = attribute.into();
        self
    }

    pub fn years(mut self, start: i64, end: i64) -> Self {
        self.year_range = YearRangeRequest { start, end };
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }
}

/// Similar entities under several attributes in a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRequest {
    pub id: EntityId,
    pub place_type: i64,
    pub attribute: Vec<AttributeId>,
    #[serde(default = "default_normalize_by")]
    pub normalize_by: AttributeId,
    pub year: i64,
    #[serde(default = "default_count")]
    pub count: i64,
}

impl MultiRequest {
    pub fn new<I, A>(id: impl Into<EntityId>, place_type: i64, attributes: I, year: i64) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AttributeId>,
    {
        Self {
            id: id.into(),
            place_type,
            attribute: attributes.into_iter().map(Into::into).collect(),
            normalize_by: default_normalize_by(),
            year,
            count: DEFAULT_COUNT,
        }
    }

    pub fn normalize_by(mut self, attribute: impl Into<AttributeId>) -> Self {
        self.normalize_by = attribute.into();
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }
}

/// Validated single-attribute query
#[derive(Debug, Clone, PartialEq)]
pub struct SingleQuery {
    pub entity: EntityId,
    pub entity_type: EntityType,
    pub attribute: AttributeId,
    pub normalize_by: AttributeId,
    pub range: YearRange,
    pub count: usize,
}

/// Validated multi-attribute query. `attributes` is non-empty, in request
/// order, without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiQuery {
    pub entity: EntityId,
    pub entity_type: EntityType,
    pub attributes: Vec<AttributeId>,
    pub normalize_by: AttributeId,
    pub year: Year,
    pub count: usize,
}
