//! In-memory entity table
//!
//! One table per entity type. Rows are entity ids, each row holds one dense
//! series per attribute with an optional value per year. Missing cells are
//! `None`; there is no sentinel value.

use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

use crate::attribute::AttributeId;
use crate::entity::{EntityId, EntityType};
use crate::error::{Error, Result};
use crate::year::{year_offset, Year, YEAR_SPAN};

/// Yearly values of one attribute for one entity, indexed by year offset.
pub type Series = [Option<f64>; YEAR_SPAN];

/// Read-only table of (entity, attribute, year) -> value.
#[derive(Debug, Clone)]
pub struct EntityTable {
    entity_type: EntityType,
    rows: BTreeMap<EntityId, AHashMap<AttributeId, Box<Series>>>,
}

impl EntityTable {
    /// An empty table, for entity types without source data.
    pub fn empty(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            rows: BTreeMap::new(),
        }
    }

    pub fn builder(entity_type: EntityType) -> EntityTableBuilder {
        EntityTableBuilder::new(entity_type)
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn exists(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn value_at(&self, id: EntityId, attribute: AttributeId, year: Year) -> Option<f64> {
        let offset = year_offset(year)?;
        self.rows.get(&id)?.get(&attribute)?[offset]
    }

    /// All entity ids, ascending.
    pub fn row_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.rows.keys().copied()
    }

    /// The full yearly series of one attribute for one entity.
    pub fn series(&self, id: EntityId, attribute: AttributeId) -> Option<&[Option<f64>]> {
        self.rows
            .get(&id)?
            .get(&attribute)
            .map(|series| series.as_slice())
    }

    /// One cell per row for a single (attribute, year) column.
    pub fn column(
        &self,
        attribute: AttributeId,
        year: Year,
    ) -> impl Iterator<Item = (EntityId, Option<f64>)> + '_ {
        self.row_ids()
            .map(move |id| (id, self.value_at(id, attribute, year)))
    }

    /// Attribute codes carrying at least one value in this table.
    pub fn attributes(&self) -> BTreeSet<AttributeId> {
        self.rows
            .values()
            .flat_map(|row| {
                row.iter()
                    .filter(|(_, series)| series.iter().any(Option::is_some))
                    .map(|(attribute, _)| *attribute)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Accumulates long-form cells and freezes them into an [`EntityTable`].
#[derive(Debug)]
pub struct EntityTableBuilder {
    entity_type: EntityType,
    rows: BTreeMap<EntityId, AHashMap<AttributeId, Box<Series>>>,
    cells: usize,
}

impl EntityTableBuilder {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            rows: BTreeMap::new(),
            cells: 0,
        }
    }

    /// Insert one cell. A `None` or non-finite value registers the entity and
    /// attribute but leaves the cell missing. Later inserts overwrite.
    pub fn insert(
        &mut self,
        id: EntityId,
        attribute: AttributeId,
        year: i64,
        value: Option<f64>,
    ) -> Result<()> {
        let offset = u16::try_from(year)
            .ok()
            .and_then(year_offset)
            .ok_or(Error::YearOutOfRange(year))?;

        let series = self
            .rows
            .entry(id)
            .or_default()
            .entry(attribute)
            .or_insert_with(|| Box::new([None; YEAR_SPAN]));

        series[offset] = value.filter(|v| v.is_finite());
        self.cells += 1;
        Ok(())
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn build(self) -> EntityTable {
        EntityTable {
            entity_type: self.entity_type,
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVENUE: AttributeId = AttributeId::TOTAL_REVENUE;

    fn sample_table() -> EntityTable {
        let mut builder = EntityTable::builder(EntityType::State);
        builder.insert(EntityId(1), REVENUE, 2000, Some(10.0)).unwrap();
        builder.insert(EntityId(1), REVENUE, 2001, None).unwrap();
        builder.insert(EntityId(3), REVENUE, 2000, Some(30.0)).unwrap();
        builder.insert(EntityId(2), AttributeId::POPULATION, 2000, Some(f64::NAN)).unwrap();
        builder.build()
    }

    #[test]
    fn test_exists_and_row_ids() {
        let table = sample_table();
        assert!(table.exists(EntityId(1)));
        assert!(table.exists(EntityId(2)));
        assert!(!table.exists(EntityId(4)));
        assert_eq!(table.row_ids().collect::<Vec<_>>(), vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.entity_type(), EntityType::State);
    }

    #[test]
    fn test_missing_is_none() {
        let table = sample_table();
        assert_eq!(table.value_at(EntityId(1), REVENUE, 2000), Some(10.0));
        assert_eq!(table.value_at(EntityId(1), REVENUE, 2001), None);
        assert_eq!(table.value_at(EntityId(1), REVENUE, 2002), None);
        assert_eq!(table.value_at(EntityId(1), REVENUE, 1900), None);
        assert_eq!(table.value_at(EntityId(2), AttributeId::POPULATION, 2000), None);
        assert_eq!(table.value_at(EntityId(9), REVENUE, 2000), None);
    }

    #[test]
    fn test_out_of_range_year_rejected() {
        let mut builder = EntityTable::builder(EntityType::City);
        assert!(matches!(
            builder.insert(EntityId(1), REVENUE, 1966, Some(1.0)),
            Err(Error::YearOutOfRange(1966))
        ));
        assert!(matches!(
            builder.insert(EntityId(1), REVENUE, -5, Some(1.0)),
            Err(Error::YearOutOfRange(-5))
        ));
        assert_eq!(builder.cells(), 0);
    }

    #[test]
    fn test_column_and_series() {
        let table = sample_table();
        let column: Vec<_> = table.column(REVENUE, 2000).collect();
        assert_eq!(
            column,
            vec![(EntityId(1), Some(10.0)), (EntityId(2), None), (EntityId(3), Some(30.0))]
        );

        let series = table.series(EntityId(1), REVENUE).unwrap();
        assert_eq!(series.len(), YEAR_SPAN);
        assert_eq!(series.iter().filter(|v| v.is_some()).count(), 1);
        assert!(table.series(EntityId(3), AttributeId::POPULATION).is_none());
    }

    #[test]
    fn test_attributes_skip_all_missing() {
        let table = sample_table();
        let attributes = table.attributes();
        assert!(attributes.contains(&REVENUE));
        assert!(!attributes.contains(&AttributeId::POPULATION));
    }
}
