//! Core batch orchestration for TitleFeed
//!
//! This crate wires the pipeline together: resolve the configuration
//! hierarchy once per batch, then for each book map its metadata onto the
//! distributor schema, validate the mapped record, and stage it for
//! emission. Configuration errors abort the batch before any record is
//! processed; everything downstream degrades per field or per record and
//! is surfaced in the batch summary and completion report.

pub mod defaults;
pub mod errors;
pub mod processor;
pub mod request;

pub use defaults::{standard_registry, standard_schema, standard_validation};
pub use errors::{BatchError, BatchResult};
pub use processor::{BatchOutput, BatchProcessor, BatchSummary};
pub use request::{BatchRequest, BookEntry};
