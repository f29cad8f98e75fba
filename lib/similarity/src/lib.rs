//! # placesim Similarity
//!
//! Similarity ranking engine for states, counties and cities.
//!
//! Given a reference entity and one or more fiscal or demographic
//! attributes, the engine finds the other entities of the same type whose
//! per-unit values are closest to the reference.
//!
//! ## Features
//!
//! - **Validation**: every problem in a request is reported at once, per field
//! - **Normalization**: values divided by a normalize-by attribute (population by default)
//! - **Year aggregation**: mean over an inclusive year range, missing years skipped
//! - **Ranking**: absolute difference for one attribute, Euclidean distance for several
//! - **Explainability**: per-attribute differences and summary statistics
//!
//! ## Example
//!
//! ```rust
//! use placesim_core::{AttributeId, Dataset, EntityId, EntityTable, EntityType};
//! use placesim_similarity::{SimilarityEngine, SingleRequest};
//!
//! let mut states = EntityTable::builder(EntityType::State);
//! for (id, population, revenue) in [(1u64, 10.0, 50.0), (2, 20.0, 90.0), (3, 5.0, 80.0)] {
//!     states.insert(EntityId(id), AttributeId::POPULATION, 2000, Some(population)).unwrap();
//!     states.insert(EntityId(id), AttributeId::TOTAL_REVENUE, 2000, Some(revenue)).unwrap();
//! }
//!
//! let engine = SimilarityEngine::new(Dataset::from_tables([states.build()]));
//! let request = SingleRequest::new(1u64, 0, AttributeId::TOTAL_REVENUE).years(2000, 2000);
//! let result = engine.find_similar_single(&request).unwrap();
//!
//! assert_eq!(result.ids(), vec![EntityId(2), EntityId(3)]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Validator  │────>│ Aggregator  │────>│   Ranker    │
//! │  (request)  │     │ (mean/years)│     │  (top-K)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Normalizer  │     │  Explain    │
//!                     │ (per-unit)  │     │  (results)  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod aggregate;
pub mod distance;
pub mod engine;
pub mod explain;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod validate;

pub use aggregate::{Aggregate, AggregateError, YearAggregator};
pub use engine::SimilarityEngine;
pub use explain::{AttributeValue, ExplainedResult, SimilarResponse, SimilarityStats};
pub use normalize::{NormalizeError, Normalizer};
pub use query::{MultiQuery, MultiRequest, SingleQuery, SingleRequest, YearRangeRequest};
pub use rank::{RankRequest, RankedEntity, RankedResult, SimilarityRanker};
pub use validate::QueryValidator;
