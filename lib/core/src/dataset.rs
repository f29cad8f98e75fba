use crate::catalog::AttributeCatalog;
use crate::entity::EntityType;
use crate::table::EntityTable;

/// Everything the engine reads: one table per entity type plus the catalog
/// derived from them. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: AttributeCatalog,
    tables: [EntityTable; 3],
}

impl Dataset {
    /// Assemble from tables, deriving the catalog from their contents.
    /// Types without a table get an empty one.
    pub fn from_tables(tables: impl IntoIterator<Item = EntityTable>) -> Self {
        let mut slots = EntityType::ALL.map(EntityTable::empty);
        for table in tables {
            let index = table.entity_type().index();
            slots[index] = table;
        }
        let catalog = AttributeCatalog::from_tables(slots.iter());
        Self {
            catalog,
            tables: slots,
        }
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn table(&self, entity_type: EntityType) -> &EntityTable {
        &self.tables[entity_type.index()]
    }

    pub fn tables(&self) -> impl Iterator<Item = &EntityTable> {
        self.tables.iter()
    }
}
