//! Field mapping for TitleFeed
//!
//! This crate turns one book's metadata plus the resolved effective
//! configuration into one [`feed_model::MappedRecord`]: exactly one string
//! value per distributor column, in schema order. Mapping is driven by a
//! registry of typed strategies - direct copies, computed derivations,
//! conditional rules, static defaults, and LLM-backed completion behind
//! the [`llm_client::FieldCompleter`] boundary.
//!
//! Mapping one field never fails the record: a strategy that cannot
//! produce a value degrades to its fallback (usually the empty string)
//! and logs a warning.

pub mod registry;
pub mod strategy;

pub use registry::FieldMappingRegistry;
pub use strategy::{ComputedField, MappingStrategy};
