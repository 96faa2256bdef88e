//! The effective configuration produced by hierarchy resolution.
//!
//! `EffectiveConfig` is an immutable value: resolution builds a fresh one
//! rather than mutating any layer in place. Alongside the merged settings
//! it carries a per-key source trace recording which level last wrote each
//! key, which the completion report and `check-config` command surface for
//! audit purposes.

use crate::layer::LayerLevel;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Which configuration source supplied a resolved key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Layer(LayerLevel),
    Schedule,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layer(level) => write!(f, "{}", level),
            Self::Schedule => write!(f, "schedule"),
        }
    }
}

/// The single merged configuration for one batch (or one book, when a
/// schedule override applies).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EffectiveConfig {
    values: BTreeMap<String, String>,
    append_fields: BTreeSet<String>,
    blank_fields: BTreeSet<String>,
    field_overrides: BTreeMap<String, String>,
    file_path_templates: BTreeMap<String, String>,
    sources: BTreeMap<String, ConfigSource>,
}

impl EffectiveConfig {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_value(&mut self, key: &str, value: String, source: ConfigSource) {
        self.values.insert(key.to_string(), value);
        self.sources.insert(key.to_string(), source);
    }

    pub(crate) fn append_value(&mut self, key: &str, value: &str, source: ConfigSource) {
        match self.values.get_mut(key) {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(value);
            }
            _ => {
                self.values.insert(key.to_string(), value.to_string());
            }
        }
        self.sources.insert(key.to_string(), source);
    }

    pub(crate) fn mark_append_field(&mut self, key: &str) {
        self.append_fields.insert(key.to_string());
    }

    pub(crate) fn mark_blank_field(&mut self, key: &str) {
        self.blank_fields.insert(key.to_string());
    }

    pub(crate) fn set_field_override(&mut self, column: &str, value: String) {
        self.field_overrides.insert(column.to_string(), value);
    }

    pub(crate) fn set_file_path_template(&mut self, name: &str, template: String) {
        self.file_path_templates.insert(name.to_string(), template);
    }

    /// Resolved value for a key, if any layer or the schedule set it.
    ///
    /// An explicit empty string is a real value here - callers must not
    /// treat it as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether a key was marked append-type by any layer.
    pub fn is_append_field(&self, key: &str) -> bool {
        self.append_fields.contains(key)
    }

    /// Whether an output column is forced to empty.
    pub fn is_blank_field(&self, column: &str) -> bool {
        self.blank_fields.contains(column)
    }

    /// Post-mapping override for an output column, if configured.
    pub fn field_override(&self, column: &str) -> Option<&str> {
        self.field_overrides.get(column).map(String::as_str)
    }

    /// Path template for a logical asset name, if configured.
    pub fn file_path_template(&self, name: &str) -> Option<&str> {
        self.file_path_templates.get(name).map(String::as_str)
    }

    /// The source that last wrote a key.
    pub fn source_of(&self, key: &str) -> Option<ConfigSource> {
        self.sources.get(key).copied()
    }

    /// All resolved keys with their values and sources, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, ConfigSource)> {
        self.values.iter().map(|(key, value)| {
            let source = self
                .sources
                .get(key)
                .copied()
                .unwrap_or(ConfigSource::Layer(LayerLevel::Default));
            (key.as_str(), value.as_str(), source)
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "effective_tests.rs"]
mod tests;
