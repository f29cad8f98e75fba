use placesim_core::{EntityType, Result};
use placesim_similarity::SimilarityEngine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::loader::load_dataset;

/// Loads the dataset once and hands out the shared engine.
pub struct DatasetManager {
    data_dir: PathBuf,
    engine: Arc<SimilarityEngine>,
}

/// Entity and attribute counts per entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub entity_type: EntityType,
    pub entities: usize,
    pub attributes: usize,
}

impl DatasetManager {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let dataset = load_dataset(&data_dir)?;

        let manager = Self {
            data_dir,
            engine: Arc::new(SimilarityEngine::new(dataset)),
        };

        for summary in manager.summary() {
            info!(
                entity_type = %summary.entity_type,
                entities = summary.entities,
                attributes = summary.attributes,
                "table ready"
            );
        }
        Ok(manager)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn engine(&self) -> Arc<SimilarityEngine> {
        self.engine.clone()
    }

    pub fn summary(&self) -> Vec<TableSummary> {
        let dataset = self.engine.dataset();
        EntityType::ALL
            .iter()
            .map(|entity_type| TableSummary {
                entity_type: *entity_type,
                entities: dataset.table(*entity_type).len(),
                attributes: dataset.catalog().attributes_for(*entity_type).len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("city.csv"),
            "entity_id,attribute,year,value\n1,1,2000,10\n1,2,2000,4\n2,1,2000,20\n",
        )
        .unwrap();

        let manager = DatasetManager::open(dir.path()).unwrap();
        assert_eq!(manager.data_dir(), dir.path());

        let summary = manager.summary();
        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary[2],
            TableSummary { entity_type: EntityType::City, entities: 2, attributes: 2 }
        );
        assert_eq!(summary[0].entities, 0);

        let engine = manager.engine();
        assert_eq!(engine.list_supported_attributes(2).unwrap().len(), 2);
    }

    #[test]
    fn test_open_rejects_malformed_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("state.csv"), "entity_id,attribute,year,value\nabc,1,2000,1\n")
            .unwrap();
        assert!(DatasetManager::open(dir.path()).is_err());
    }
}
