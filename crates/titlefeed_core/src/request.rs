//! Batch request types.

use config_manager::{ConfigLayer, ScheduleOverride};
use feed_model::BookMetadata;
use serde::Deserialize;

/// One book in a batch, with its optional schedule override.
#[derive(Debug, Clone, Deserialize)]
pub struct BookEntry {
    pub metadata: BookMetadata,
    /// Per-book overrides that win over every configuration layer.
    #[serde(default)]
    pub schedule_override: Option<ScheduleOverride>,
}

impl BookEntry {
    pub fn new(metadata: BookMetadata) -> Self {
        Self {
            metadata,
            schedule_override: None,
        }
    }

    pub fn with_schedule_override(mut self, schedule: ScheduleOverride) -> Self {
        self.schedule_override = Some(schedule);
        self
    }

    /// Operator-facing identifier: ISBN when assigned, else the title.
    pub fn identifier(&self) -> String {
        self.metadata
            .isbn13
            .clone()
            .unwrap_or_else(|| self.metadata.title.clone())
    }
}

/// Everything needed to run one batch.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Books in emission order.
    pub books: Vec<BookEntry>,
    /// Configuration layers, least to most specific.
    pub layers: Vec<ConfigLayer>,
}

impl BatchRequest {
    pub fn new(books: Vec<BookEntry>, layers: Vec<ConfigLayer>) -> Self {
        Self { books, layers }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
