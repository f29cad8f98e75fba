//! Data access for placesim: CSV sources in, immutable engine out.

pub mod loader;
pub mod manager;

pub use loader::{load_dataset, load_table, load_table_from_reader, LoadStats};
pub use manager::{DatasetManager, TableSummary};
