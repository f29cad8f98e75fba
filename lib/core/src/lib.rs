//! # placesim Core
//!
//! Core data model for the placesim similarity service.
//!
//! - [`EntityType`] / [`EntityId`] - states, counties and cities
//! - [`AttributeId`] - integer codes for fiscal and demographic measures
//! - [`AttributeCatalog`] - which attributes each entity type supports
//! - [`EntityTable`] - read-only (entity, attribute, year) -> value store
//! - [`Dataset`] - the catalog plus one table per entity type
//!
//! ## Example
//!
//! ```rust
//! use placesim_core::{AttributeId, Dataset, EntityId, EntityTable, EntityType};
//!
//! let mut builder = EntityTable::builder(EntityType::State);
//! builder.insert(EntityId(6), AttributeId::POPULATION, 2000, Some(33_871_648.0)).unwrap();
//! builder.insert(EntityId(6), AttributeId::TOTAL_REVENUE, 2000, Some(1.7e11)).unwrap();
//!
//! let dataset = Dataset::from_tables([builder.build()]);
//! assert!(dataset.catalog().supports(EntityType::State, AttributeId::TOTAL_REVENUE));
//! assert_eq!(
//!     dataset.table(EntityType::State).value_at(EntityId(6), AttributeId::POPULATION, 2000),
//!     Some(33_871_648.0),
//! );
//! ```

pub mod attribute;
pub mod catalog;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod table;
pub mod year;

pub use attribute::{AttributeId, KnownAttribute, KNOWN_ATTRIBUTES};
pub use catalog::AttributeCatalog;
pub use dataset::Dataset;
pub use entity::{EntityId, EntityType};
pub use error::{Error, FieldErrors, Result};
pub use table::{EntityTable, EntityTableBuilder};
pub use year::{Year, YearRange, MAX_YEAR, MIN_YEAR};
