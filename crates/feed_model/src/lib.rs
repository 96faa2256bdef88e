//! Shared domain types for TitleFeed
//!
//! This crate holds the value types that flow through the feed pipeline:
//! book metadata as ingested, the distributor's fixed column schema, and
//! the mapped records produced by the field mapper and consumed by
//! validation and emission. It deliberately contains no behaviour beyond
//! accessors - resolution, mapping and validation live in their own crates.

pub mod metadata;
pub mod record;
pub mod schema;

pub use metadata::{BookMetadata, Contributor, PhysicalSpecs, TerritoryPrice};
pub use record::{MappedField, MappedRecord, ValueOrigin};
pub use schema::{ColumnSchema, SchemaError};
