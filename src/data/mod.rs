//! Dataset ingestion.

pub mod catalogue;

pub use catalogue::{CatalogueError, ConditionEntry};
