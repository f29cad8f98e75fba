//! Attribute catalog
//!
//! Registry of which attribute codes are valid (for similarity and as
//! normalizers) per entity type, and which are common to every type.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::attribute::AttributeId;
use crate::entity::EntityType;
use crate::error::Result;
use crate::table::EntityTable;

/// Immutable per-type attribute registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeCatalog {
    by_type: [BTreeSet<AttributeId>; 3],
    common: BTreeSet<AttributeId>,
}

impl AttributeCatalog {
    /// Build from explicit attribute sets per type. Types missing from
    /// `entries` support nothing.
    pub fn new<I, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (EntityType, A)>,
        A: IntoIterator<Item = AttributeId>,
    {
        let mut by_type: [BTreeSet<AttributeId>; 3] = Default::default();
        for (entity_type, attributes) in entries {
            by_type[entity_type.index()].extend(attributes);
        }

        let common = by_type
            .iter()
            .skip(1)
            .fold(by_type[0].clone(), |acc, set| {
                acc.intersection(set).copied().collect()
            });

        Self { by_type, common }
    }

    /// Derive the catalog from loaded tables: an attribute is supported for
    /// a type when its table carries at least one value for it.
    pub fn from_tables<'a>(tables: impl IntoIterator<Item = &'a EntityTable>) -> Self {
        Self::new(
            tables
                .into_iter()
                .map(|table| (table.entity_type(), table.attributes())),
        )
    }

    pub fn attributes_for(&self, entity_type: EntityType) -> &BTreeSet<AttributeId> {
        &self.by_type[entity_type.index()]
    }

    /// Lookup by raw wire code; fails with `UnknownEntityType`.
    pub fn attributes_for_code(&self, code: i64) -> Result<&BTreeSet<AttributeId>> {
        let entity_type = EntityType::from_code(code)?;
        Ok(self.attributes_for(entity_type))
    }

    pub fn common_attributes(&self) -> &BTreeSet<AttributeId> {
        &self.common
    }

    pub fn supports(&self, entity_type: EntityType, attribute: AttributeId) -> bool {
        self.by_type[entity_type.index()].contains(&attribute)
    }
}
