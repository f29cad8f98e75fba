//! # placesim
//!
//! Find the states, counties and cities most similar to a reference place
//! on fiscal and demographic attributes such as revenue, taxes,
//! expenditures and population.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! placesim --data-dir ./data --http-port 5000
//! curl -X POST localhost:5000/api/similar/single \
//!     -H 'content-type: application/json' \
//!     -d '{"id": 6, "place_type": 0, "attribute": 2, "year_range": {"start": 2000, "end": 2005}}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use placesim::prelude::*;
//!
//! let mut counties = EntityTable::builder(EntityType::County);
//! for (id, population, taxes) in [(1u64, 1000.0, 50.0), (2, 2000.0, 110.0), (3, 500.0, 90.0)] {
//!     counties.insert(EntityId(id), AttributeId::POPULATION, 2010, Some(population)).unwrap();
//!     counties.insert(EntityId(id), AttributeId::TOTAL_TAXES, 2010, Some(taxes)).unwrap();
//! }
//!
//! let engine = SimilarityEngine::new(Dataset::from_tables([counties.build()]));
//! let request = MultiRequest::new(1u64, 1, [AttributeId::TOTAL_TAXES], 2010).count(1);
//! let result = engine.find_similar_multi(&request).unwrap();
//! assert_eq!(result.ids(), vec![EntityId(2)]);
//! ```
//!
//! ## Crate Structure
//!
//! - [`placesim-core`](https://docs.rs/placesim-core) - Entity types, attribute catalog, entity tables
//! - [`placesim-similarity`](https://docs.rs/placesim-similarity) - Validation, normalization, aggregation, ranking
//! - [`placesim-storage`](https://docs.rs/placesim-storage) - CSV loading
//! - [`placesim-api`](https://docs.rs/placesim-api) - REST API

// Re-export core types
pub use placesim_core::{
    AttributeCatalog, AttributeId, Dataset, EntityId, EntityTable, EntityType,
    Error, FieldErrors, Result, YearRange, MAX_YEAR, MIN_YEAR,
};

// Re-export the engine
pub use placesim_similarity::{
    MultiRequest, RankedResult, SimilarResponse, SimilarityEngine, SingleRequest,
};

// Re-export storage
pub use placesim_storage::DatasetManager;

// Re-export API
pub use placesim_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttributeCatalog, AttributeId, Dataset, EntityId, EntityTable, EntityType,
        Error, FieldErrors, Result, YearRange,
        MultiRequest, RankedResult, SimilarResponse, SimilarityEngine, SingleRequest,
        DatasetManager, RestApi,
    };
}
