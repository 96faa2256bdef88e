//! Validation pipeline for TitleFeed
//!
//! Runs an ordered list of independent field validators over a mapped
//! record and aggregates a structured pass/fail report. Validators never
//! depend on one another's outcome and no failure halts the pass - every
//! validator always runs, so the report lists everything wrong with a
//! record at once.
//!
//! Most findings are errors (bad ISBN checksum, unknown BISAC code); the
//! byte-length rule instead *corrects* the record, truncating at a word
//! boundary and reporting a warning.

pub mod codes;
pub mod errors;
pub mod isbn;
pub mod pipeline;
pub mod report;
pub mod rules;

pub use codes::{CodeListValidator, CodeSet};
pub use errors::{RuleLoadError, RuleLoadResult};
pub use isbn::IsbnValidator;
pub use pipeline::{FieldValidator, ValidationPipeline};
pub use report::{FieldFinding, Severity, ValidationReport};
pub use rules::{ByteLengthValidator, DateValidator, FileNamingValidator, PriceValidator};
