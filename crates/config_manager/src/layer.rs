//! Configuration layers and the schedule override.
//!
//! Each hierarchy level is an immutable `ConfigLayer` value: a flat
//! key-to-string map plus the special annotations the distributor feed
//! understands (`append_fields`, `blank_fields`, `field_overrides`,
//! `file_path_templates`). Layers are resolved least to most specific:
//! Default, Publisher, Imprint, Tranche. A `ScheduleOverride` sits outside
//! the layer stack and is applied last, unconditionally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hierarchy level of a configuration layer, least to most specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerLevel {
    Default,
    Publisher,
    Imprint,
    Tranche,
}

impl std::fmt::Display for LayerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Publisher => "publisher",
            Self::Imprint => "imprint",
            Self::Tranche => "tranche",
        };
        write!(f, "{}", name)
    }
}

/// One configuration document at one hierarchy level.
///
/// Immutable once constructed. An explicit empty-string value is a
/// deliberate override that suppresses anything set by a less specific
/// layer - it is not the same as an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigLayer {
    pub level: LayerLevel,

    /// Flat key-to-value settings for this level.
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// Keys whose values concatenate onto the accumulated value instead
    /// of replacing it.
    #[serde(default)]
    pub append_fields: Vec<String>,

    /// Output columns forced to empty regardless of any strategy output.
    #[serde(default)]
    pub blank_fields: Vec<String>,

    /// Output column overrides applied after mapping strategies run.
    #[serde(default)]
    pub field_overrides: BTreeMap<String, String>,

    /// Logical asset name to path template, e.g.
    /// `"cover" -> "{isbn}_cover.pdf"`.
    #[serde(default)]
    pub file_path_templates: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Create an empty layer at the given level.
    pub fn empty(level: LayerLevel) -> Self {
        Self {
            level,
            values: BTreeMap::new(),
            append_fields: Vec::new(),
            blank_fields: Vec::new(),
            field_overrides: BTreeMap::new(),
            file_path_templates: BTreeMap::new(),
        }
    }

    /// Whether this layer marks a key as append-type.
    pub fn is_append_field(&self, key: &str) -> bool {
        self.append_fields.iter().any(|k| k == key)
    }
}

/// Per-book schedule override document.
///
/// Every key present here overwrites the resolved layer value
/// unconditionally - the single wins-always rule in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ScheduleOverride {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl ScheduleOverride {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "layer_tests.rs"]
mod tests;
