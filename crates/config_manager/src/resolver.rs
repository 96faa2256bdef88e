//! Configuration hierarchy resolution engine.
//!
//! This module merges the layered configuration documents
//! (Default → Publisher → Imprint → Tranche) plus an optional per-book
//! schedule override into one [`EffectiveConfig`].
//!
//! # Precedence
//!
//! The merge follows a strict precedence order from lowest to highest:
//! 1. **Default** - suite-wide defaults
//! 2. **Publisher** - publisher house settings
//! 3. **Imprint** - imprint brand settings
//! 4. **Tranche** - per-release-wave overrides (highest layer)
//!
//! Per key, a more specific layer either overwrites the accumulated value
//! or, when the key appears in that layer's `append_fields`, concatenates
//! onto it with a single separating space. An explicit empty-string value
//! overwrites like any other value - it is a deliberate suppression, not a
//! missing key.
//!
//! After all layers, the schedule override is applied: every key present
//! in it overwrites unconditionally. This is the single wins-always rule,
//! so a schedule value beats even a tranche value for the same key.

use crate::{
    effective::{ConfigSource, EffectiveConfig},
    errors::{ConfigurationError, ConfigurationResult},
    layer::{ConfigLayer, LayerLevel, ScheduleOverride},
};
use tracing::debug;

/// Configuration hierarchy resolution engine.
///
/// Stateless - it takes layer inputs and produces a fresh effective
/// configuration without retaining anything between calls.
///
/// # Examples
///
/// ```rust
/// use config_manager::{ConfigLayer, HierarchyResolver, LayerLevel};
///
/// let mut tranche = ConfigLayer::empty(LayerLevel::Tranche);
/// tranche
///     .values
///     .insert("imprint_name".to_string(), "Night Garden Press".to_string());
///
/// let resolver = HierarchyResolver::new();
/// let effective = resolver.resolve(&[tranche], None)?;
/// assert_eq!(effective.get("imprint_name"), Some("Night Garden Press"));
/// # Ok::<(), config_manager::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HierarchyResolver {}

impl HierarchyResolver {
    /// Creates a new hierarchy resolver.
    pub fn new() -> Self {
        Self {}
    }

    /// Resolves layers and an optional schedule override into one
    /// effective configuration.
    ///
    /// Layers must be supplied least to most specific. Missing levels may
    /// simply be omitted; the level ordering of the supplied layers is
    /// validated so a caller cannot accidentally hand the stack over in
    /// reverse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::HierarchyResolutionFailed` when layers
    /// arrive out of level order. Malformed documents are rejected earlier,
    /// at load time, so resolution never partially applies a bad layer.
    pub fn resolve(
        &self,
        layers: &[ConfigLayer],
        schedule_override: Option<&ScheduleOverride>,
    ) -> ConfigurationResult<EffectiveConfig> {
        self.validate_layer_order(layers)?;

        let mut effective = EffectiveConfig::new();

        for layer in layers {
            self.apply_layer(&mut effective, layer);
        }

        if let Some(schedule) = schedule_override {
            self.apply_schedule_override(&mut effective, schedule);
        }

        Ok(effective)
    }

    /// Layers must arrive least to most specific, each level at most once.
    fn validate_layer_order(&self, layers: &[ConfigLayer]) -> ConfigurationResult<()> {
        let mut previous: Option<LayerLevel> = None;
        for layer in layers {
            if let Some(prev) = previous {
                if layer.level <= prev {
                    return Err(ConfigurationError::HierarchyResolutionFailed {
                        reason: format!(
                            "layers out of order: '{}' follows '{}'",
                            layer.level, prev
                        ),
                    });
                }
            }
            previous = Some(layer.level);
        }
        Ok(())
    }

    /// Applies one layer's settings onto the accumulated configuration.
    fn apply_layer(&self, effective: &mut EffectiveConfig, layer: &ConfigLayer) {
        let source = ConfigSource::Layer(layer.level);

        for (key, value) in &layer.values {
            if layer.is_append_field(key) {
                effective.append_value(key, value, source);
            } else {
                effective.set_value(key, value.clone(), source);
            }
        }

        // Annotations accumulate across layers: append/blank lists union,
        // overrides and path templates are last-write-wins.
        for key in &layer.append_fields {
            effective.mark_append_field(key);
        }
        for column in &layer.blank_fields {
            effective.mark_blank_field(column);
        }
        for (column, value) in &layer.field_overrides {
            effective.set_field_override(column, value.clone());
        }
        for (name, template) in &layer.file_path_templates {
            effective.set_file_path_template(name, template.clone());
        }

        debug!(
            layer = %layer.level,
            keys = layer.values.len(),
            overrides = layer.field_overrides.len(),
            "Applied configuration layer"
        );
    }

    /// Applies the schedule override: every key overwrites unconditionally.
    fn apply_schedule_override(
        &self,
        effective: &mut EffectiveConfig,
        schedule: &ScheduleOverride,
    ) {
        for (key, value) in &schedule.values {
            effective.set_value(key, value.clone(), ConfigSource::Schedule);
        }

        debug!(
            keys = schedule.values.len(),
            "Applied schedule override on top of layer stack"
        );
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
