//! Per-unit normalization
//!
//! Divides a raw attribute value by the value of a normalizing attribute
//! (population by default) for the same entity and year.

use placesim_core::{AttributeId, EntityId, EntityTable, Year};

/// Why a (entity, year) point could not be normalized. Never surfaced to
/// callers; the aggregator drops the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("raw value is missing")]
    Missing,

    #[error("normalizing value is zero or missing")]
    DivisionUndefined,

    #[error("normalized value is not finite")]
    NotFinite,
}

/// Normalizes values of one entity table.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    table: &'a EntityTable,
}

impl<'a> Normalizer<'a> {
    pub fn new(table: &'a EntityTable) -> Self {
        Self { table }
    }

    /// `raw(attribute) / raw(normalize_by)` for `id` in `year`.
    pub fn normalize(
        &self,
        id: EntityId,
        attribute: AttributeId,
        normalize_by: AttributeId,
        year: Year,
    ) -> Result<f64, NormalizeError> {
        let divisor = match self.table.value_at(id, normalize_by, year) {
            Some(v) if v != 0.0 => v,
            _ => return Err(NormalizeError::DivisionUndefined),
        };
        let raw = self
            .table
            .value_at(id, attribute, year)
            .ok_or(NormalizeError::Missing)?;

        let value = raw / divisor;
        if !value.is_finite() {
            return Err(NormalizeError::NotFinite);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placesim_core::EntityType;

    const POP: AttributeId = AttributeId::POPULATION;
    const REV: AttributeId = AttributeId::TOTAL_REVENUE;

    fn table() -> EntityTable {
        let mut builder = EntityTable::builder(EntityType::State);
        builder.insert(EntityId(1), POP, 2000, Some(200.0)).unwrap();
        builder.insert(EntityId(1), REV, 2000, Some(50.0)).unwrap();
        builder.insert(EntityId(1), POP, 2001, Some(0.0)).unwrap();
        builder.insert(EntityId(1), REV, 2001, Some(50.0)).unwrap();
        builder.insert(EntityId(1), REV, 2002, Some(50.0)).unwrap();
        builder.insert(EntityId(1), POP, 2003, Some(100.0)).unwrap();
        builder.build()
    }

    #[test]
    fn test_per_capita() {
        let table = table();
        let normalizer = Normalizer::new(&table);
        assert_eq!(normalizer.normalize(EntityId(1), REV, POP, 2000), Ok(0.25));
    }

    #[test]
    fn test_zero_divisor() {
        let table = table();
        let normalizer = Normalizer::new(&table);
        assert_eq!(
            normalizer.normalize(EntityId(1), REV, POP, 2001),
            Err(NormalizeError::DivisionUndefined)
        );
    }

    #[test]
    fn test_missing_divisor_and_value() {
        let table = table();
        let normalizer = Normalizer::new(&table);
        assert_eq!(
            normalizer.normalize(EntityId(1), REV, POP, 2002),
            Err(NormalizeError::DivisionUndefined)
        );
        assert_eq!(
            normalizer.normalize(EntityId(1), REV, POP, 2003),
            Err(NormalizeError::Missing)
        );
    }

    #[test]
    fn test_overflowing_quotient() {
        let mut builder = EntityTable::builder(EntityType::State);
        builder.insert(EntityId(1), POP, 2000, Some(1e-10)).unwrap();
        builder.insert(EntityId(1), REV, 2000, Some(1e308)).unwrap();
        let table = builder.build();

        let normalizer = Normalizer::new(&table);
        assert_eq!(
            normalizer.normalize(EntityId(1), REV, POP, 2000),
            Err(NormalizeError::NotFinite)
        );
    }

    #[test]
    fn test_self_normalization_is_one() {
        let table = table();
        let normalizer = Normalizer::new(&table);
        assert_eq!(normalizer.normalize(EntityId(1), POP, POP, 2000), Ok(1.0));
    }
}
