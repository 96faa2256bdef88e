//! Configuration management for TitleFeed
//!
//! Publishing configuration arrives as four layered JSON documents
//! (default, publisher, imprint, tranche) plus an optional per-book
//! schedule override. This crate models each layer as an immutable value
//! object, resolves the stack into a single effective configuration with
//! strict precedence rules, and tracks which level supplied every key for
//! audit and reporting.

pub mod effective;
pub mod errors;
pub mod layer;
pub mod loader;
pub mod resolver;

// Re-export for convenient access
pub use effective::{ConfigSource, EffectiveConfig};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use layer::{ConfigLayer, LayerLevel, ScheduleOverride};
pub use loader::{load_layer, load_schedule_override};
pub use resolver::HierarchyResolver;
