//! Feed emission for TitleFeed
//!
//! Serializes validated mapped records into the distributor's
//! fixed-column CSV layout (RFC 4180 quoting, UTF-8) and renders the
//! parallel human-readable completion report. A record whose mapped field
//! count does not match the header is skipped with a clear error rather
//! than emitted as a misaligned row; the batch continues.

pub mod emitter;
pub mod errors;
pub mod report;

pub use emitter::{EmitOutcome, FeedEmitter, SkippedRecord};
pub use errors::EmitError;
pub use report::{CompletionReport, RecordOutcome, ReportEntry};
